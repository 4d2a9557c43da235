///
/// Outcome of sending message to a single device
///
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub token: String,
    pub success: bool,
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn succeeded(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(token: impl Into<String>, error: impl ToString) -> Self {
        Self {
            token: token.into(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<DispatchResult>,
}

impl FromIterator<DispatchResult> for BatchResponse {
    fn from_iter<I: IntoIterator<Item = DispatchResult>>(iter: I) -> Self {
        let mut batch_response = BatchResponse::default();
        batch_response.extend(iter);

        batch_response
    }
}

impl Extend<DispatchResult> for BatchResponse {
    fn extend<I: IntoIterator<Item = DispatchResult>>(&mut self, iter: I) {
        for result in iter {
            match result.success {
                true => self.success_count += 1,
                false => self.failure_count += 1,
            }
            self.responses.push(result);
        }
    }
}
