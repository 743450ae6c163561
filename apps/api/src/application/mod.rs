// Application form: field state, validation, submission workflow and its HTTP surface.
// The contact service is reached only through `contacts::ContactSink`.

pub mod form;
pub mod handlers;
pub mod latch;
pub mod page;
pub mod quote;
pub mod reference;
pub mod templates;
pub mod upload;

#[cfg(test)]
pub mod test_support;
