//! Macros.

/// Generates the signer seeds for a [crate::Gateway].
#[macro_export]
macro_rules! gen_gateway_signer_seeds {
    ($gateway:expr) => {
        &[
            b"Gateway" as &[u8],
            &$gateway.base.to_bytes(),
            &[$gateway.bump],
        ]
    };
}
