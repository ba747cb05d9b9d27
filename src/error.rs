pub type PlanpressResult<T> = Result<T, PlanpressError>;

#[derive(thiserror::Error, Debug)]
pub enum PlanpressError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("generation error: {0}")]
    Generate(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanpressError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn generate(msg: impl Into<String>) -> Self {
        Self::Generate(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PlanpressError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            PlanpressError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            PlanpressError::generate("x")
                .to_string()
                .contains("generation error:")
        );
        assert!(
            PlanpressError::delivery("x")
                .to_string()
                .contains("delivery error:")
        );
        assert!(
            PlanpressError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PlanpressError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
