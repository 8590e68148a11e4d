/// Form field snapshot and validation.
pub mod form;
/// Submission workflow against a transport.
pub mod submit;
