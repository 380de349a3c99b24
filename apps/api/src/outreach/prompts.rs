// Prompt text for mentor outreach emails.

/// Placeholder for any mentor or student field the caller did not supply.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Salutation used when the mentor's name is unknown.
pub const DEFAULT_MENTOR_NAME: &str = "Professor";

/// Context block sent to the email assistant.
/// Replace: {name}, {institution}, {expertise}, {summary}, {lab}, {goals}, {resume_line}
pub const EMAIL_CONTEXT_TEMPLATE: &str = "Context for Email Generation:

Mentor Details:
- Name: {name}
- Institution: {institution}
- Research Expertise: {expertise}
- Research Summary: {summary}
- Lab Name: {lab}

Student Details:
- Outreach Goals: {goals}
{resume_line}

Task: Generate a personalized, professional research mentorship request email.";

/// Static letter used when no assistant is involved.
/// Replace: {name}, {expertise_list}, {institution}, {department}, {goals}, {primary_expertise}
pub const EMAIL_LETTER_TEMPLATE: &str = "Dear {name},

I hope this email finds you well. My name is [Your Name], and I am a high school student interested in conducting research in {expertise_list} at {institution}. I found your profile while researching faculty members in the {department}.

{goals}

I was particularly intrigued by your research in {primary_expertise}. I would greatly appreciate the opportunity to learn more about your work and potentially discuss mentorship opportunities.

Thank you for your time.

Best regards,
[Your Name]";
