/// Blocking prompts shown to the user, the counterpart of `alert` and `confirm`.
pub trait Dialog {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

impl<D: Dialog + ?Sized> Dialog for &D {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
