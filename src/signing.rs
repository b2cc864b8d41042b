use alloy::{
    primitives::Address,
    signers::Signer,
};

use crate::error::SdkError;

/// 65-byte `r || s || v` signature with `v` in the canonical 27/28
/// form, plus the address it recovers to.
#[derive(Clone, Debug)]
pub struct SignedMessage {
    pub address: Address,
    pub signature: [u8; 65],
}

/// Normalizes a 65-byte signature's recovery byte to the 27/28
/// convention the protocol's off-chain authorization endpoint expects.
///
/// Hardware wallets disagree on the last byte: some emit the raw
/// recovery id (0/1), others the legacy 27/28. Splitting and rejoining
/// with a normalized `v` accepts both. Any other trailing byte is
/// malformed.
pub fn canonicalize_signature(raw: &[u8]) -> Result<[u8; 65], SdkError> {
    let bytes: &[u8; 65] = raw
        .try_into()
        .map_err(|_| SdkError::MalformedSignature(format!("{} bytes, expected 65", raw.len())))?;

    let mut canonical = *bytes;
    canonical[64] = match bytes[64] {
        v @ (0 | 1) => v + 27,
        v @ (27 | 28) => v,
        v => {
            return Err(SdkError::MalformedSignature(format!(
                "recovery byte {v} out of range"
            )));
        }
    };
    Ok(canonical)
}

/// Signs `message` (EIP-191 personal message) and returns the signer's
/// address with the canonicalized signature, ready for the off-chain
/// authorization flow.
pub async fn sign_canonical<S: Signer + Sync>(
    signer: &S,
    message: &[u8],
) -> Result<SignedMessage, SdkError> {
    let signature = signer.sign_message(message).await?;
    Ok(SignedMessage {
        address: signer.address(),
        signature: canonicalize_signature(&signature.as_bytes())?,
    })
}
