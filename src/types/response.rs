/// Final signable payload, terminal artifact of the pipeline.
pub type TxData = alloy::rpc::types::TransactionRequest;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Outcome of a single orchestrator call.
///
/// Validation problems (wrong request kind, missing position) are
/// recovered locally and surface here with [`STATUS_BAD_REQUEST`];
/// infrastructure faults never become a response and propagate as
/// [`crate::error::SdkError`] instead.
#[derive(Clone, Debug)]
pub struct MutationResponse {
    status_code: u16,
    message: Vec<String>,
    tx_data: Vec<TxData>,
}

impl MutationResponse {
    pub(crate) fn success(message: &str, tx: TxData) -> Self {
        Self {
            status_code: STATUS_OK,
            message: vec![message.to_string()],
            tx_data: vec![tx],
        }
    }

    pub(crate) fn failure(message: &str) -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            message: vec![message.to_string()],
            tx_data: vec![],
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    pub fn message(&self) -> &[String] {
        &self.message
    }

    /// Transactions ready for signing; empty on failure, exactly one on
    /// success.
    pub fn tx_data(&self) -> &[TxData] {
        &self.tx_data
    }

    pub fn into_tx_data(self) -> Vec<TxData> {
        self.tx_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes() {
        let ok = MutationResponse::success("deposit success", TxData::default());
        assert!(ok.is_success());
        assert_eq!(ok.status_code(), STATUS_OK);
        assert_eq!(ok.message(), ["deposit success"]);
        assert_eq!(ok.tx_data().len(), 1);

        let bad = MutationResponse::failure("the type is not correct");
        assert!(!bad.is_success());
        assert_eq!(bad.status_code(), STATUS_BAD_REQUEST);
        assert!(bad.tx_data().is_empty());
    }
}
