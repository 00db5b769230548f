// Content Store Gateway, the live public document, and the public read API.

pub mod gateway;
pub mod handlers;
pub mod live;
