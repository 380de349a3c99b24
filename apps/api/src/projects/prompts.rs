// Prompt text for the project idea generator.

pub const PROJECT_SYSTEM: &str =
    "You are a helpful science teacher assisting students with science fair projects.";

/// Replace: {interests}, {grade_level}, {field_of_study}, {resources}
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Generate a detailed science fair project idea based on the following criteria:
  - Interest Area: {interests}
  - Grade Level: {grade_level}
  - Field of Study: {field_of_study}
  - Available Resources: {resources}

  Please provide a response in the following format:
  {
    "title": "Project title",
    "description": "Brief project description",
    "hypothesis": "The hypothesis to test",
    "materials": ["List of required materials"],
    "procedure": ["Step-by-step procedure"],
    "expectedOutcome": "What to expect",
    "difficulty": "Beginner/Intermediate/Advanced",
    "timeRequired": "Estimated time to complete",
    "safetyNotes": "Any safety considerations"
  }"#;
