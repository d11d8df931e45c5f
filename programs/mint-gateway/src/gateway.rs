//! Gateway and minter state transitions.
//!
//! Every instruction handler funnels its state changes through the methods
//! here; account wiring stays in the instruction `validate`s. All transitions
//! check before they write, so a rejected transition leaves both structs
//! untouched even outside the transaction revert machinery.

use anchor_lang::prelude::*;

use crate::{ErrorCode, Gateway, Minter};

impl Gateway {
    /// Asserts that `caller` is the current admin.
    pub fn check_admin(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.admin, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Asserts that `caller` is the pending admin of an outstanding handoff.
    pub fn check_pending_admin(&self, caller: Pubkey) -> Result<()> {
        require_keys_neq!(
            self.pending_admin,
            Pubkey::default(),
            ErrorCode::NoPendingAdmin
        );
        require_keys_eq!(caller, self.pending_admin, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Nominates the next admin. The current admin stays in control until the
    /// nominee accepts; nominating again replaces the previous nominee.
    pub fn propose_admin(&mut self, next_admin: Pubkey) {
        self.pending_admin = next_admin;
    }

    /// Promotes the pending admin, clearing the nomination.
    /// Returns the previous admin.
    pub fn accept_admin(&mut self) -> Result<Pubkey> {
        require_keys_neq!(
            self.pending_admin,
            Pubkey::default(),
            ErrorCode::NoPendingAdmin
        );
        let previous_admin = self.admin;
        self.admin = self.pending_admin;
        self.pending_admin = Pubkey::default();
        Ok(previous_admin)
    }

    /// Claims the next minter index. Returns the index of the new [Minter].
    ///
    /// [Gateway::num_minters] only ever grows; it is an index nonce, not the
    /// size of a live set.
    pub fn register_minter(&mut self) -> Result<u64> {
        let index = self.num_minters;
        self.num_minters = index.checked_add(1).ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(index)
    }

    /// Sets a [Minter]'s allowance, keeping [Gateway::total_allowance] equal
    /// to the sum of all allowances by applying the delta.
    /// Returns the previous allowance.
    pub fn set_allowance(&mut self, minter: &mut Minter, new_allowance: u64) -> Result<u64> {
        let previous_allowance = minter.allowance;
        self.total_allowance = self
            .total_allowance
            .checked_add(new_allowance)
            .and_then(|v| v.checked_sub(previous_allowance))
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        minter.allowance = new_allowance;
        Ok(previous_allowance)
    }

    /// Consumes allowance and cap headroom for a mint of `amount`.
    ///
    /// An overflow while checking the cap is a cap breach, never wraparound.
    /// The consumed allowance also leaves [Gateway::total_allowance], since a
    /// mint is an implicit allowance decrease.
    pub fn record_mint(&mut self, minter: &mut Minter, amount: u64) -> Result<()> {
        require_gt!(amount, 0, ErrorCode::InvalidAmount);
        require_gte!(minter.allowance, amount, ErrorCode::AllowanceExceeded);
        let new_total_minted = self
            .total_minted
            .checked_add(amount)
            .ok_or(ErrorCode::HardCapExceeded)?;
        require_gte!(self.hard_cap, new_total_minted, ErrorCode::HardCapExceeded);

        let new_allowance = minter
            .allowance
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let new_minter_total = minter
            .total_minted
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let new_total_allowance = self
            .total_allowance
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        minter.allowance = new_allowance;
        minter.total_minted = new_minter_total;
        self.total_minted = new_total_minted;
        self.total_allowance = new_total_allowance;
        Ok(())
    }
}

impl Minter {
    /// Asserts that `caller` is the authority entitled to mint through this
    /// [Minter].
    pub fn check_authority(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.authority, ErrorCode::Unauthorized);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HARD_CAP: u64 = 1_000_000_000_000_000;

    fn test_gateway(hard_cap: u64) -> Gateway {
        Gateway {
            admin: Pubkey::new_unique(),
            hard_cap,
            ..Gateway::default()
        }
    }

    fn test_minter(gateway: &mut Gateway) -> Minter {
        let index = gateway.register_minter().unwrap();
        Minter {
            authority: Pubkey::new_unique(),
            index,
            ..Minter::default()
        }
    }

    fn assert_code<T: core::fmt::Debug>(res: Result<T>, expected: ErrorCode) {
        let message = res.expect_err("expected failure").to_string();
        assert!(
            message.contains(&format!("{:?}", expected)),
            "expected {:?}, got: {}",
            expected,
            message
        );
    }

    #[test]
    fn test_admin_handoff_round_trip() {
        let mut gateway = test_gateway(HARD_CAP);
        let original_admin = gateway.admin;
        let next_admin = Pubkey::new_unique();

        gateway.check_admin(original_admin).unwrap();
        gateway.propose_admin(next_admin);
        assert_eq!(gateway.admin, original_admin);
        assert_eq!(gateway.pending_admin, next_admin);

        gateway.check_pending_admin(next_admin).unwrap();
        assert_eq!(gateway.accept_admin().unwrap(), original_admin);
        assert_eq!(gateway.admin, next_admin);
        assert_eq!(gateway.pending_admin, Pubkey::default());

        // and back again
        gateway.propose_admin(original_admin);
        gateway.check_pending_admin(original_admin).unwrap();
        gateway.accept_admin().unwrap();
        assert_eq!(gateway.admin, original_admin);
        assert_eq!(gateway.pending_admin, Pubkey::default());
    }

    #[test]
    fn test_renomination_replaces_stale_nominee() {
        let mut gateway = test_gateway(HARD_CAP);
        let first_nominee = Pubkey::new_unique();
        let second_nominee = Pubkey::new_unique();

        gateway.propose_admin(first_nominee);
        gateway.propose_admin(second_nominee);
        assert_eq!(gateway.pending_admin, second_nominee);

        assert_code(
            gateway.check_pending_admin(first_nominee),
            ErrorCode::Unauthorized,
        );
        gateway.check_pending_admin(second_nominee).unwrap();
    }

    #[test]
    fn test_accept_without_nomination() {
        let mut gateway = test_gateway(HARD_CAP);
        assert_code(
            gateway.check_pending_admin(Pubkey::new_unique()),
            ErrorCode::NoPendingAdmin,
        );
        assert_code(gateway.accept_admin(), ErrorCode::NoPendingAdmin);
    }

    #[test]
    fn test_check_admin_rejects_non_admin() {
        let gateway = test_gateway(HARD_CAP);
        gateway.check_admin(gateway.admin).unwrap();
        assert_code(
            gateway.check_admin(Pubkey::new_unique()),
            ErrorCode::Unauthorized,
        );
    }

    #[test]
    fn test_register_minter_indices() {
        let mut gateway = test_gateway(HARD_CAP);
        assert_eq!(gateway.register_minter().unwrap(), 0);
        assert_eq!(gateway.register_minter().unwrap(), 1);
        assert_eq!(gateway.num_minters, 2);
    }

    #[test]
    fn test_set_allowance_tracks_total() {
        let mut gateway = test_gateway(HARD_CAP);
        let mut minter_a = test_minter(&mut gateway);
        let mut minter_b = test_minter(&mut gateway);

        assert_eq!(gateway.set_allowance(&mut minter_a, 1_000_000).unwrap(), 0);
        gateway.set_allowance(&mut minter_b, 250).unwrap();
        assert_eq!(gateway.total_allowance, 1_000_250);

        // shrinking applies a negative delta
        gateway.set_allowance(&mut minter_b, 100).unwrap();
        assert_eq!(gateway.total_allowance, 1_000_100);
    }

    #[test]
    fn test_revocation_preserves_audit_trail() {
        let mut gateway = test_gateway(HARD_CAP);
        let mut minter = test_minter(&mut gateway);

        gateway.set_allowance(&mut minter, 1_000_000).unwrap();
        gateway.record_mint(&mut minter, 400).unwrap();
        assert_eq!(minter.total_minted, 400);

        let previous = gateway.set_allowance(&mut minter, 0).unwrap();
        assert_eq!(previous, 999_600);
        assert_eq!(gateway.total_allowance, 0);
        assert_eq!(minter.allowance, 0);
        assert_eq!(minter.total_minted, 400);
    }

    #[test]
    fn test_mint_zero_amount() {
        let mut gateway = test_gateway(HARD_CAP);
        let mut minter = test_minter(&mut gateway);
        gateway.set_allowance(&mut minter, 100).unwrap();
        assert_code(
            gateway.record_mint(&mut minter, 0),
            ErrorCode::InvalidAmount,
        );
        assert_eq!(minter.allowance, 100);
        assert_eq!(gateway.total_minted, 0);
    }

    #[test]
    fn test_mint_allowance_boundary() {
        let mut gateway = test_gateway(HARD_CAP);
        let mut minter = test_minter(&mut gateway);
        gateway.set_allowance(&mut minter, 500).unwrap();

        // minting the full allowance is the maximal legal single mint
        gateway.record_mint(&mut minter, 500).unwrap();
        assert_eq!(minter.allowance, 0);
        assert_eq!(minter.total_minted, 500);
        assert_eq!(gateway.total_allowance, 0);
        assert_eq!(gateway.total_minted, 500);

        assert_code(
            gateway.record_mint(&mut minter, 1),
            ErrorCode::AllowanceExceeded,
        );
    }

    #[test]
    fn test_mint_hard_cap_boundary() {
        let mut gateway = test_gateway(1_000);
        let mut minter = test_minter(&mut gateway);
        gateway.set_allowance(&mut minter, 2_000).unwrap();

        // landing exactly on the cap is legal
        gateway.record_mint(&mut minter, 1_000).unwrap();
        assert_eq!(gateway.total_minted, 1_000);

        assert_code(
            gateway.record_mint(&mut minter, 1),
            ErrorCode::HardCapExceeded,
        );
        assert_eq!(gateway.total_minted, 1_000);
        assert_eq!(minter.allowance, 1_000);
    }

    #[test]
    fn test_cap_check_overflow_is_cap_exceeded() {
        let mut gateway = test_gateway(u64::MAX);
        let mut minter = test_minter(&mut gateway);
        gateway.set_allowance(&mut minter, u64::MAX).unwrap();
        gateway.total_minted = u64::MAX - 1;

        assert_code(
            gateway.record_mint(&mut minter, 2),
            ErrorCode::HardCapExceeded,
        );
        assert_eq!(gateway.total_minted, u64::MAX - 1);
    }

    #[test]
    fn test_minter_authority_check() {
        let mut gateway = test_gateway(HARD_CAP);
        let minter = test_minter(&mut gateway);
        minter.check_authority(minter.authority).unwrap();
        assert_code(
            minter.check_authority(Pubkey::new_unique()),
            ErrorCode::Unauthorized,
        );
    }

    /// Hard cap 10^15, decimals 9: a 1_000 mint against a 1_000_000 allowance
    /// succeeds; re-minting 1_000_000 against the 999_000 remainder does not.
    #[test]
    fn test_allowance_consumption_scenario() {
        let mut gateway = test_gateway(1_000_000_000_000_000);
        let mut minter = test_minter(&mut gateway);
        gateway.set_allowance(&mut minter, 1_000_000).unwrap();

        gateway.record_mint(&mut minter, 1_000).unwrap();
        assert_eq!(minter.allowance, 999_000);
        assert_eq!(minter.total_minted, 1_000);
        assert_eq!(gateway.total_minted, 1_000);
        assert_eq!(gateway.total_allowance, 999_000);

        assert_code(
            gateway.record_mint(&mut minter, 1_000_000),
            ErrorCode::AllowanceExceeded,
        );
        assert_eq!(minter.allowance, 999_000);
        assert_eq!(gateway.total_minted, 1_000);
    }

    #[derive(Clone, Debug)]
    enum Op {
        SetAllowance(usize, u64),
        Mint(usize, u64),
    }

    fn op_strategy(num_minters: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..num_minters, 0u64..=2_000_000).prop_map(|(i, v)| Op::SetAllowance(i, v)),
            (0..num_minters, 0u64..=2_000_000).prop_map(|(i, v)| Op::Mint(i, v)),
        ]
    }

    proptest! {
        /// After any sequence of allowance updates and mints, the aggregate
        /// counters match the per-minter records exactly.
        #[test]
        fn test_aggregates_stay_consistent(
            hard_cap in 0u64..=10_000_000,
            ops in prop::collection::vec(op_strategy(4), 1..64),
        ) {
            let mut gateway = test_gateway(hard_cap);
            let mut minters: Vec<Minter> =
                (0..4).map(|_| test_minter(&mut gateway)).collect();
            let mut audits = vec![0u64; minters.len()];

            for op in ops {
                match op {
                    Op::SetAllowance(i, allowance) => {
                        gateway.set_allowance(&mut minters[i], allowance).unwrap();
                    }
                    Op::Mint(i, amount) => {
                        let before = (gateway, minters[i]);
                        if gateway.record_mint(&mut minters[i], amount).is_err() {
                            // rejected mints must not move anything
                            prop_assert_eq!(before, (gateway, minters[i]));
                        }
                    }
                }

                let allowance_sum: u64 =
                    minters.iter().map(|m| m.allowance).sum();
                prop_assert_eq!(gateway.total_allowance, allowance_sum);
                prop_assert!(gateway.total_minted <= gateway.hard_cap);

                let minted_sum: u64 =
                    minters.iter().map(|m| m.total_minted).sum();
                prop_assert_eq!(gateway.total_minted, minted_sum);

                for (minter, audit) in minters.iter().zip(audits.iter_mut()) {
                    // per-minter audit counters never decrease
                    prop_assert!(minter.total_minted >= *audit);
                    *audit = minter.total_minted;
                }
            }
        }
    }
}
