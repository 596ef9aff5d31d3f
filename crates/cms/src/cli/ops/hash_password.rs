use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct HashPassword {
    /// Plaintext password to hash
    pub password: String,

    /// bcrypt work factor
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
    pub cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum HashPasswordError {
    #[error("empty passwords are not allowed")]
    EmptyPassword,
    #[error("failed to hash password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for HashPassword {
    type Error = HashPasswordError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.password.is_empty() {
            return Err(HashPasswordError::EmptyPassword);
        }
        Ok(bcrypt::hash(&self.password, self.cost)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::{Op, OpContext};

    #[tokio::test]
    async fn test_hash_verifies() {
        let op = HashPassword {
            password: "secret".to_string(),
            cost: 4,
        };
        let hash = op.execute(&OpContext::new(None)).await.unwrap();
        assert!(bcrypt::verify("secret", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_rejects_empty_password() {
        let op = HashPassword {
            password: String::new(),
            cost: 4,
        };
        assert!(matches!(
            op.execute(&OpContext::new(None)).await,
            Err(HashPasswordError::EmptyPassword)
        ));
    }
}
