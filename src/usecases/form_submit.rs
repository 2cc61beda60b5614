//! Form submission with a loading state that is always released.

use thiserror::Error;

use crate::domain::form::FormData;

pub const LOADING_LABEL: &str = "Loading...";

/// The submit button of a form.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_disabled(&mut self, disabled: bool);
    fn show_loading(&mut self);
    fn set_label(&mut self, label: &str);
}

/// Disables the control on acquire; re-enables it and restores the label on drop.
///
/// Drop also runs while unwinding, so a panicking callback cannot leave the
/// button stuck in the loading state.
pub struct SubmitGuard<'a> {
    control: &'a mut dyn SubmitControl,
    original_label: String,
}

impl<'a> SubmitGuard<'a> {
    pub fn acquire(control: &'a mut dyn SubmitControl) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.show_loading();

        Self {
            control,
            original_label,
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        self.control.set_label(&self.original_label);
    }
}

#[derive(Debug, Error)]
pub enum FormSubmitError {
    #[error("form `{form_id}` submit handler failed: {reason}")]
    Callback {
        form_id: String,
        reason: anyhow::Error,
    },
}

pub type SubmitCallback = Box<dyn FnMut(FormData) -> anyhow::Result<()>>;

/// Runs `callback` with the control held in its loading state.
pub fn submit_with<F>(
    form_id: &str,
    control: &mut dyn SubmitControl,
    data: FormData,
    callback: F,
) -> Result<(), FormSubmitError>
where
    F: FnOnce(FormData) -> anyhow::Result<()>,
{
    let _guard = SubmitGuard::acquire(control);

    callback(data).map_err(|reason| FormSubmitError::Callback {
        form_id: form_id.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use anyhow::anyhow;

    use super::*;

    #[derive(Debug)]
    struct StubButton {
        label: String,
        disabled: bool,
        history: Vec<String>,
    }

    impl StubButton {
        fn new(label: &str) -> Self {
            Self {
                label: label.to_owned(),
                disabled: false,
                history: Vec::new(),
            }
        }
    }

    impl SubmitControl for StubButton {
        fn label(&self) -> String {
            self.label.clone()
        }

        fn set_disabled(&mut self, disabled: bool) {
            self.disabled = disabled;
            self.history.push(format!("disabled={disabled}"));
        }

        fn show_loading(&mut self) {
            self.label = LOADING_LABEL.to_owned();
            self.history.push("loading".to_owned());
        }

        fn set_label(&mut self, label: &str) {
            self.label = label.to_owned();
            self.history.push(format!("label={label}"));
        }
    }

    #[test]
    fn callback_sees_control_in_loading_state() {
        let mut button = StubButton::new("Save");
        let mut data = FormData::default();
        data.append("title", "Logo");

        submit_with("profile", &mut button, data, |data| {
            assert_eq!(data.get("title"), Some("Logo"));
            Ok(())
        })
        .expect("submit must succeed");

        assert_eq!(
            button.history,
            ["disabled=true", "loading", "disabled=false", "label=Save"]
        );
    }

    #[test]
    fn failing_callback_restores_control_and_returns_error() {
        let mut button = StubButton::new("Submit Review");

        let err = submit_with("review", &mut button, FormData::default(), |_| {
            Err(anyhow!("server said no"))
        })
        .expect_err("callback error must propagate");

        assert!(err.to_string().contains("server said no"));
        assert!(!button.disabled);
        assert_eq!(button.label, "Submit Review");
    }

    #[test]
    fn panicking_callback_still_restores_control() {
        let mut button = StubButton::new("Send");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _ = submit_with("dispute", &mut button, FormData::default(), |_| {
                panic!("callback blew up")
            });
        }));

        assert!(outcome.is_err());
        assert!(!button.disabled);
        assert_eq!(button.label, "Send");
    }
}
