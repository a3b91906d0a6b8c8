use crate::constants::*;
use crate::dom;
use crate::listener::Listener;
use eventtimes_core::inquiry::{
    FormField, FormStatus, InquiryForm, RelayOutcome, RelayPayload, FALLBACK_MESSAGE,
};
use eventtimes_core::ChoreoError;
use gloo_net::http::Request;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

async fn post_inquiry(payload: &RelayPayload) -> RelayOutcome {
    let request = match Request::post(RELAY_ENDPOINT)
        .header("Accept", "application/json")
        .json(payload)
    {
        Ok(r) => r,
        Err(e) => return RelayOutcome::Unreachable(e.to_string()),
    };
    match request.send().await {
        Ok(resp) => RelayOutcome::from_status(resp.status()),
        Err(e) => RelayOutcome::Unreachable(e.to_string()),
    }
}

struct FormView {
    form: web::HtmlFormElement,
    confirmation: Option<web::HtmlElement>,
    error: Option<web::HtmlElement>,
    submit: Option<web::HtmlButtonElement>,
}

impl FormView {
    fn field_element(&self, field: FormField) -> Option<web::Element> {
        self.form
            .query_selector(&format!("[name=\"{}\"]", field.name()))
            .ok()
            .flatten()
    }

    fn read(&self, field: FormField) -> String {
        let Some(el) = self.field_element(field) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn clear_inputs(&self) {
        for field in FormField::ALL {
            let Some(el) = self.field_element(field) else {
                continue;
            };
            if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
                input.set_value("");
            } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
                area.set_value("");
            }
        }
    }

    fn show_error(&self, message: Option<&str>) {
        match (&self.error, message) {
            (Some(el), Some(msg)) => {
                el.set_text_content(Some(msg));
                dom::toggle_class(el, HIDDEN_CLASS, false);
            }
            (Some(el), None) => dom::toggle_class(el, HIDDEN_CLASS, true),
            (None, Some(msg)) => {
                if let Some(w) = web::window() {
                    _ = w.alert_with_message(msg);
                }
            }
            (None, None) => {}
        }
    }

    fn render(&self, status: FormStatus) {
        if let Some(el) = &self.confirmation {
            dom::toggle_class(el, HIDDEN_CLASS, !matches!(status, FormStatus::Confirmed { .. }));
        }
        dom::toggle_class(&self.form, HIDDEN_CLASS, matches!(status, FormStatus::Confirmed { .. }));
        if let Some(btn) = &self.submit {
            btn.set_disabled(status == FormStatus::Submitting);
        }
        match status {
            FormStatus::Failed => self.show_error(Some(FALLBACK_MESSAGE)),
            FormStatus::Submitting | FormStatus::Confirmed { .. } => self.show_error(None),
            FormStatus::Editing => {}
        }
    }
}

pub struct ContactForm {
    state: Rc<RefCell<InquiryForm>>,
    view: Rc<FormView>,
    _submit: Listener,
}

impl ContactForm {
    pub fn attach(document: &web::Document) -> Option<Self> {
        let form = document
            .get_element_by_id(CONTACT_FORM_ID)?
            .dyn_into::<web::HtmlFormElement>()
            .ok()?;
        let view = Rc::new(FormView {
            form,
            confirmation: dom::html_by_id(document, CONTACT_CONFIRMATION_ID),
            error: dom::html_by_id(document, CONTACT_ERROR_ID),
            submit: document
                .get_element_by_id(CONTACT_SUBMIT_ID)
                .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok()),
        });
        let state = Rc::new(RefCell::new(InquiryForm::new()));
        view.render(state.borrow().status());

        let submit = {
            let target = view.form.clone();
            let state = state.clone();
            let view = view.clone();
            Listener::new(&target, "submit", move |ev| {
                ev.prevent_default();
                Self::submit(&state, &view);
            })
        };
        match submit {
            Ok(listener) => Some(Self {
                state,
                view,
                _submit: listener,
            }),
            Err(e) => {
                log::warn!("[inquiry] form not wired: {:?}", e);
                None
            }
        }
    }

    fn submit(state: &Rc<RefCell<InquiryForm>>, view: &Rc<FormView>) {
        let payload = {
            let mut form = state.borrow_mut();
            for field in FormField::ALL {
                form.edit(field, view.read(field));
            }
            match form.begin_submit() {
                Ok(p) => p,
                Err(ChoreoError::InvalidInquiry(field)) => {
                    view.show_error(Some(&field.to_string()));
                    return;
                }
                Err(e) => {
                    log::debug!("[inquiry] {}", e);
                    return;
                }
            }
        };
        view.render(FormStatus::Submitting);
        let state = state.clone();
        let view = view.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = post_inquiry(&payload).await;
            let delivered = outcome == RelayOutcome::Delivered;
            let status = {
                let mut form = state.borrow_mut();
                form.finish(outcome, Instant::now());
                form.status()
            };
            if delivered {
                view.clear_inputs();
            }
            view.render(status);
        });
    }

    /// Called every frame; hides the confirmation once its window has passed.
    pub fn tick(&self, now: Instant) {
        let changed = self.state.borrow_mut().tick(now);
        if changed {
            self.view.render(self.state.borrow().status());
        }
    }
}
