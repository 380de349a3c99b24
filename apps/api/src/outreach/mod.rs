// Mentor outreach: assistant-written emails and the static letter template.

pub mod email;
pub mod handlers;
pub mod prompts;
pub mod template;
