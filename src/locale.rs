use super::*;

/// User-facing text shown by the behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub name_too_short: String,
    pub name_invalid_characters: String,
    pub email_required: String,
    pub email_invalid: String,
    pub phone_required: String,
    pub phone_invalid: String,
    pub message_too_short: String,
    pub privacy_not_accepted: String,
    /// Label the submit button shows while the form "sends".
    pub sending: String,
    pub scroll_to_top_label: String,
    /// Text drawn inside the broken-image placeholder.
    pub image_placeholder: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self::latvian()
    }
}

impl Locale {
    pub fn latvian() -> Self {
        Self {
            name_too_short: "Lūdzu, ievadiet derīgu vārdu (vismaz 2 rakstzīmes)".into(),
            name_invalid_characters: "Vārds satur nederīgas rakstzīmes".into(),
            email_required: "E-pasta adrese ir obligāta".into(),
            email_invalid: "Lūdzu, ievadiet derīgu e-pasta adresi".into(),
            phone_required: "Telefona numurs ir obligāts".into(),
            phone_invalid: "Lūdzu, ievadiet derīgu telefona numuru".into(),
            message_too_short: "Ziņojumam jābūt vismaz 10 rakstzīmēm garam".into(),
            privacy_not_accepted: "Jums jāpiekrīt privātuma politikai".into(),
            sending: "Sūta...".into(),
            scroll_to_top_label: "Atgriezties augšā".into(),
            image_placeholder: "Image".into(),
        }
    }

    pub fn message(&self, error: ValidationError) -> &str {
        match error {
            ValidationError::NameTooShort => &self.name_too_short,
            ValidationError::NameInvalidCharacters => &self.name_invalid_characters,
            ValidationError::EmailRequired => &self.email_required,
            ValidationError::EmailInvalid => &self.email_invalid,
            ValidationError::PhoneRequired => &self.phone_required,
            ValidationError::PhoneInvalid => &self.phone_invalid,
            ValidationError::MessageTooShort => &self.message_too_short,
            ValidationError::PrivacyNotAccepted => &self.privacy_not_accepted,
        }
    }
}
