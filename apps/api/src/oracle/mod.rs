// Oracle readings: prompt composition, the request pipeline, response
// structuring, and the HTTP handlers that expose them.
// All generation calls go through llm_client.

pub mod composer;
pub mod daily;
pub mod handlers;
pub mod prompts;
pub mod reading;
pub mod sections;
