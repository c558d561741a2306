pub mod groq;

use crate::configuration::ConfigError;
use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox, ConfigError> {
        return Ok(Box::new(groq::Groq::from_config()?));
    }
}
