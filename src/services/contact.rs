use crate::forms::contact::{ContactForm, ContactMessage};
use crate::services::ServiceResult;

/// Validates and sanitizes a contact request. There is no backend endpoint
/// for it, so accepted messages are only logged.
pub fn submit_contact(form: ContactForm) -> ServiceResult<ContactMessage> {
    let message = ContactMessage::try_from(form)?;
    log::info!(
        "Contact request from {} <{}>{}: {}",
        message.name,
        message.email,
        message
            .phone
            .as_deref()
            .map(|phone| format!(" tel. {phone}"))
            .unwrap_or_default(),
        message.message
    );
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;

    #[test]
    fn invalid_email_is_a_form_error() {
        let result = submit_contact(ContactForm {
            name: "Ana".to_string(),
            email: "ana-at-correo".to_string(),
            phone: String::new(),
            message: "Hola".to_string(),
        });
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn accepted_message_keeps_phone() {
        let message = submit_contact(ContactForm {
            name: "Ana".to_string(),
            email: "Ana@Correo.com".to_string(),
            phone: "8888 1111".to_string(),
            message: "¿Hacen envíos a Rivas?".to_string(),
        })
        .unwrap();
        assert_eq!(message.email.as_str(), "ana@correo.com");
        assert_eq!(message.phone.as_deref(), Some("8888 1111"));
    }
}
