use super::*;

use tracing::{debug, trace};

const SUBMIT_DELAY_MS: i64 = 800;
const SPINNER_HTML: &str =
    r#"<span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>"#;

#[derive(Debug)]
struct ContactForm {
    fields: Vec<(ContactField, NodeId)>,
    submit_button: Option<NodeId>,
    validators: Validators,
    locale: Rc<Locale>,
}

impl ContactForm {
    /// Shows or clears the inline error for one field. Returns whether it passed.
    fn validate(&self, page: &mut Page, field: ContactField, input: NodeId) -> Result<bool> {
        let value = page.dom.value(input)?;
        let checked = page.dom.checked(input)?;
        match self.validators.check(field, &value, checked) {
            Some(error) => {
                trace!(?field, %error, "field rejected");
                show_error(page, input, self.locale.message(error))?;
                Ok(false)
            }
            None => {
                clear_error(page, input)?;
                Ok(true)
            }
        }
    }

    fn submit(&self, page: &mut Page, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        event.stop_propagation();

        let mut failed = 0usize;
        for (field, input) in &self.fields {
            if !self.validate(page, *field, *input)? {
                failed += 1;
            }
        }
        if failed > 0 {
            debug!(failed, "contact form submission blocked");
            return Ok(());
        }

        let Some(button) = self.submit_button else {
            return Ok(());
        };
        page.dom.set_disabled(button, true)?;
        page.dom
            .set_inner_html(button, &format!("{SPINNER_HTML}{}", self.locale.sending))?;
        page.set_timeout(SUBMIT_DELAY_MS, |page| page.navigate(THANK_YOU_PAGE));
        debug!("contact form accepted, redirect scheduled");
        Ok(())
    }
}

pub(crate) fn init(page: &mut Page, locale: Rc<Locale>) -> Result<()> {
    let Some(form) = page.dom.query_selector(CONTACT_FORM)? else {
        debug!("no contact form, validation disabled");
        return Ok(());
    };

    let fields = ContactField::ALL
        .into_iter()
        .filter_map(|field| page.dom.by_id(field.element_id()).map(|node| (field, node)))
        .collect::<Vec<_>>();
    let submit_button = page.dom.query_selector_from(form, SUBMIT_BUTTON)?;

    let contact = Rc::new(ContactForm {
        fields,
        submit_button,
        validators: Validators::new()?,
        locale,
    });

    for (field, input) in contact.fields.iter().copied() {
        if !field.validates_on_blur() {
            continue;
        }
        let c = Rc::clone(&contact);
        page.add_event_listener(EventTarget::Node(input), "blur", false, move |page, _| {
            c.validate(page, field, input).map(|_| ())
        });
    }

    let c = Rc::clone(&contact);
    page.add_event_listener(EventTarget::Node(form), "submit", false, move |page, event| {
        c.submit(page, event)
    });

    debug!(fields = contact.fields.len(), "contact form wired");
    Ok(())
}

fn field_group(page: &Page, input: NodeId) -> Result<Option<NodeId>> {
    Ok(page
        .dom
        .closest(input, FIELD_GROUP)?
        .or_else(|| page.dom.parent_element(input)))
}

fn show_error(page: &mut Page, input: NodeId, message: &str) -> Result<()> {
    let Some(group) = field_group(page, input)? else {
        return Ok(());
    };
    let error = match page.dom.query_selector_from(group, FIELD_ERROR)? {
        Some(error) => error,
        None => {
            let error = page.dom.create_detached_element("div");
            page.dom.set_attr(error, "class", "invalid-feedback")?;
            page.dom.append_child(group, error)?;
            error
        }
    };
    page.dom.set_text_content(error, message)?;
    page.dom.style_set(error, "display", "block")?;
    page.dom.class_add(input, INVALID_CLASS)
}

fn clear_error(page: &mut Page, input: NodeId) -> Result<()> {
    if let Some(group) = field_group(page, input)? {
        if let Some(error) = page.dom.query_selector_from(group, FIELD_ERROR)? {
            page.dom.style_set(error, "display", "none")?;
        }
    }
    page.dom.class_remove(input, INVALID_CLASS)
}
