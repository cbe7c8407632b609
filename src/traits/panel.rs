/// Output target of the feature query: accepts an HTML fragment and replaces
/// whatever it showed before.
pub trait Panel: Send + Sync {
    fn replace(&self, html: String);
}
