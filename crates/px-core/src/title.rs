//! Window title override that restores the original title on drop.

/// Get/set access to the single global document title.
pub trait TitleProvider {
    fn title(&self) -> String;
    fn set_title(&self, title: &str);
}

/// Holds a title override for as long as it lives.
///
/// The title in place when the guard was created is captured once and
/// restored on drop, however many times [`TitleGuard::set`] ran in between.
pub struct TitleGuard<P: TitleProvider> {
    provider: P,
    original: String,
}

impl<P: TitleProvider> TitleGuard<P> {
    pub fn new(provider: P, title: &str) -> Self {
        let original = provider.title();
        provider.set_title(title);
        log::trace!("title override {title:?} (was {original:?})");
        Self { provider, original }
    }

    pub fn set(&mut self, title: &str) {
        self.provider.set_title(title);
    }

    pub fn original(&self) -> &str {
        &self.original
    }
}

impl<P: TitleProvider + ?Sized> TitleProvider for &P {
    fn title(&self) -> String {
        (**self).title()
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}

impl<P: TitleProvider> Drop for TitleGuard<P> {
    fn drop(&mut self) {
        self.provider.set_title(&self.original);
    }
}
