use super::*;

// The `s` inside the name class is a literal letter, so spaces are rejected.
const NAME_PATTERN: &str = r"^[a-zA-ZÀ-ÿs\x{0100}-\x{017F}\x{0400}-\x{04FF}\-']+$";
// `\s` plus U+FEFF, the whitespace set browsers use for `trim` and regex.
const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";
const PHONE_PATTERN: &str = r"^[+0-9\s\x{FEFF}()\-]{7,20}$";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// Why a contact form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    #[error("name is shorter than 2 characters")]
    NameTooShort,
    #[error("name contains characters outside the allowed set")]
    NameInvalidCharacters,
    #[error("email is required")]
    EmailRequired,
    #[error("email is not a valid address")]
    EmailInvalid,
    #[error("phone is required")]
    PhoneRequired,
    #[error("phone is not a valid number")]
    PhoneInvalid,
    #[error("message is shorter than 10 characters")]
    MessageTooShort,
    #[error("privacy policy was not accepted")]
    PrivacyNotAccepted,
}

/// Fields of the contact form, each bound to an element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
    Privacy,
}

impl ContactField {
    /// Submit validates in this order.
    pub const ALL: [ContactField; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Message,
        Self::Privacy,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Name => "contact-name",
            Self::Email => "contact-email",
            Self::Phone => "contact-phone",
            Self::Message => "contact-message",
            Self::Privacy => "contact-privacy",
        }
    }

    /// Privacy is only checked on submit.
    pub fn validates_on_blur(self) -> bool {
        !matches!(self, Self::Privacy)
    }
}

/// Pure contact-form validators. Each returns the first rule the input breaks.
#[derive(Debug, Clone)]
pub struct Validators {
    name: Pattern,
    email: Pattern,
    phone: Pattern,
}

impl Validators {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: Pattern::new(NAME_PATTERN)?,
            email: Pattern::new(EMAIL_PATTERN)?,
            phone: Pattern::new(PHONE_PATTERN)?,
        })
    }

    pub fn name(&self, value: &str) -> Option<ValidationError> {
        if trimmed_len(value) < NAME_MIN_CHARS {
            return Some(ValidationError::NameTooShort);
        }
        if !self.name.is_match(value) {
            return Some(ValidationError::NameInvalidCharacters);
        }
        None
    }

    pub fn email(&self, value: &str) -> Option<ValidationError> {
        if trimmed_len(value) == 0 {
            return Some(ValidationError::EmailRequired);
        }
        if !self.email.is_match(value) {
            return Some(ValidationError::EmailInvalid);
        }
        None
    }

    pub fn phone(&self, value: &str) -> Option<ValidationError> {
        if trimmed_len(value) == 0 {
            return Some(ValidationError::PhoneRequired);
        }
        if !self.phone.is_match(value) {
            return Some(ValidationError::PhoneInvalid);
        }
        None
    }

    pub fn message(&self, value: &str) -> Option<ValidationError> {
        (trimmed_len(value) < MESSAGE_MIN_CHARS).then_some(ValidationError::MessageTooShort)
    }

    pub fn privacy(&self, checked: bool) -> Option<ValidationError> {
        (!checked).then_some(ValidationError::PrivacyNotAccepted)
    }

    /// Text fields read `value`; the privacy checkbox reads `checked`.
    pub fn check(&self, field: ContactField, value: &str, checked: bool) -> Option<ValidationError> {
        match field {
            ContactField::Name => self.name(value),
            ContactField::Email => self.email(value),
            ContactField::Phone => self.phone(value),
            ContactField::Message => self.message(value),
            ContactField::Privacy => self.privacy(checked),
        }
    }
}

/// Whitespace as browsers trim it: Unicode `White_Space` minus U+0085, plus U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// Length of the trimmed value in UTF-16 code units, the unit form fields
/// report lengths in.
fn trimmed_len(value: &str) -> usize {
    value.trim_matches(is_form_whitespace).encode_utf16().count()
}
