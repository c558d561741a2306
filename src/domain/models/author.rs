use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Model,
    PdfChat,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return String::from("You"),
            Author::Model => {
                let model = Config::get(ConfigKey::Model);
                if model.is_empty() {
                    return String::from("Assistant");
                }
                return model;
            }
            Author::PdfChat => return String::from("PdfChat"),
        }
    }
}
