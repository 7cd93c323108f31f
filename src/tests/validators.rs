use super::*;

fn validators() -> Validators {
    match Validators::new() {
        Ok(validators) => validators,
        Err(err) => panic!("validator patterns should compile: {err}"),
    }
}

#[test]
fn email_rules() {
    let v = validators();
    assert_eq!(v.email(""), Some(ValidationError::EmailRequired));
    assert_eq!(v.email("   "), Some(ValidationError::EmailRequired));
    assert_eq!(v.email("a@b"), Some(ValidationError::EmailInvalid));
    assert_eq!(v.email("a b@c.lv"), Some(ValidationError::EmailInvalid));
    assert_eq!(v.email("a@@b.lv"), Some(ValidationError::EmailInvalid));
    assert_eq!(v.email("a@b.com"), None);
    assert_eq!(v.email("anna.berzina@pasts.example.lv"), None);
}

#[test]
fn message_length_counts_trimmed_characters() {
    let v = validators();
    assert_eq!(v.message("123456789"), Some(ValidationError::MessageTooShort));
    assert_eq!(v.message("  123456789  "), Some(ValidationError::MessageTooShort));
    assert_eq!(v.message("1234567890"), None);
    // Ten letters, several of them multi-byte.
    assert_eq!(v.message("ļļļļļēēēēē"), None);
}

#[test]
fn lengths_count_utf16_units() {
    let v = validators();
    // Seven visible characters plus an emoji that takes two units.
    assert_eq!(v.message("Sveiki! 😀"), None);
    assert_eq!(v.message("Sveiki!😀"), Some(ValidationError::MessageTooShort));
    // A lone emoji is long enough and then fails the character class.
    assert_eq!(v.name("😀"), Some(ValidationError::NameInvalidCharacters));
}

#[test]
fn byte_order_mark_counts_as_whitespace() {
    let v = validators();
    assert_eq!(v.email("\u{FEFF}"), Some(ValidationError::EmailRequired));
    assert_eq!(v.email(" \u{FEFF}\u{00A0}"), Some(ValidationError::EmailRequired));
    assert_eq!(v.email("a\u{FEFF}b@c.lv"), Some(ValidationError::EmailInvalid));
    assert_eq!(v.phone("\u{FEFF}\u{FEFF}"), Some(ValidationError::PhoneRequired));
    assert_eq!(v.phone("2000\u{FEFF}0000"), None);
    assert_eq!(v.message("\u{FEFF}123456789\u{FEFF}"), Some(ValidationError::MessageTooShort));
    assert_eq!(v.name("\u{FEFF}A\u{FEFF}"), Some(ValidationError::NameTooShort));
}

#[test]
fn name_accepts_latin_extended_and_cyrillic_letters() {
    let v = validators();
    for name in ["Anna", "Jānis", "Ģirts", "Žanis", "Иван", "O'Brien", "Anna-Marija", "Élodie"] {
        assert_eq!(v.name(name), None, "{name} should be accepted");
    }
}

#[test]
fn name_rejects_short_and_foreign_characters() {
    let v = validators();
    assert_eq!(v.name(""), Some(ValidationError::NameTooShort));
    assert_eq!(v.name(" A "), Some(ValidationError::NameTooShort));
    assert_eq!(v.name("R2D2"), Some(ValidationError::NameInvalidCharacters));
    assert_eq!(v.name("anna@lv"), Some(ValidationError::NameInvalidCharacters));
}

#[test]
fn name_character_class_holds_a_literal_s_not_whitespace() {
    let v = validators();
    // A space is outside the class, so full names with a space are rejected.
    assert_eq!(
        v.name("Anna Bērziņa"),
        Some(ValidationError::NameInvalidCharacters)
    );
    // Leading whitespace passes the length check and then fails the class.
    assert_eq!(v.name(" Anna"), Some(ValidationError::NameInvalidCharacters));
    assert_eq!(v.name("ss"), None);
}

#[test]
fn phone_rules() {
    let v = validators();
    assert_eq!(v.phone(""), Some(ValidationError::PhoneRequired));
    assert_eq!(v.phone("  "), Some(ValidationError::PhoneRequired));
    assert_eq!(v.phone("+371 2000 0000"), None);
    assert_eq!(v.phone("(67) 123-456"), None);
    assert_eq!(v.phone("1234567"), None);
    assert_eq!(v.phone("123456"), Some(ValidationError::PhoneInvalid));
    assert_eq!(v.phone("123456789012345678901"), Some(ValidationError::PhoneInvalid));
    assert_eq!(v.phone("2000 000 ext"), Some(ValidationError::PhoneInvalid));
    assert_eq!(v.phone("１２３４５６７"), Some(ValidationError::PhoneInvalid));
}

#[test]
fn privacy_and_field_dispatch() {
    let v = validators();
    assert_eq!(v.privacy(false), Some(ValidationError::PrivacyNotAccepted));
    assert_eq!(v.privacy(true), None);
    assert_eq!(v.check(ContactField::Privacy, "ignored", true), None);
    assert_eq!(
        v.check(ContactField::Email, "", true),
        Some(ValidationError::EmailRequired)
    );
    assert_eq!(
        v.check(ContactField::Message, "short", false),
        Some(ValidationError::MessageTooShort)
    );
}

#[test]
fn contact_fields_map_to_element_ids() {
    let ids = ContactField::ALL.map(ContactField::element_id);
    assert_eq!(
        ids,
        [
            "contact-name",
            "contact-email",
            "contact-phone",
            "contact-message",
            "contact-privacy"
        ]
    );
    assert!(!ContactField::Privacy.validates_on_blur());
    assert!(ContactField::Phone.validates_on_blur());
}

#[test]
fn latvian_locale_is_the_default_text() {
    let locale = Locale::default();
    assert_eq!(
        locale.message(ValidationError::EmailRequired),
        "E-pasta adrese ir obligāta"
    );
    assert_eq!(
        locale.message(ValidationError::NameInvalidCharacters),
        "Vārds satur nederīgas rakstzīmes"
    );
    assert_eq!(locale.sending, "Sūta...");
    assert_eq!(
        ValidationError::PhoneInvalid.to_string(),
        "phone is not a valid number"
    );
}
