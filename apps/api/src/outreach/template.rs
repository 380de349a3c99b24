use crate::mentors::models::MentorRecord;
use crate::outreach::prompts::EMAIL_LETTER_TEMPLATE;

/// Fills the static outreach letter for `mentor`. No model call involved.
pub fn render_letter(mentor: &MentorRecord, student_goals: &str) -> String {
    let primary = mentor
        .expertise
        .first()
        .map(String::as_str)
        .unwrap_or("your field");

    EMAIL_LETTER_TEMPLATE
        .replace("{name}", &mentor.name)
        .replace("{expertise_list}", &mentor.expertise.join(", "))
        .replace("{institution}", &mentor.institution)
        .replace("{department}", &mentor.department)
        .replace("{primary_expertise}", primary)
        .replace("{goals}", student_goals.trim())
        .trim()
        .to_string()
}
