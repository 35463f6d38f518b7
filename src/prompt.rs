use crate::api::QuestionnaireInput;

/// Bumped whenever the template wording or field order changes.
pub const PROMPT_TEMPLATE_VERSION: u32 = 1;

pub const SYSTEM_INSTRUCTION: &str =
    "You are an experienced career counselor specializing in guidance for adolescents";

/// Renders the user message for a questionnaire. Field order is fixed.
pub fn build_prompt(input: &QuestionnaireInput) -> String {
    format!(
        "As a professional career counselor, please provide detailed career planning advice \
for the teenager based on the following questionnaire answers:

Questionnaire answers:
- Favorite subject: {favorite_subject}
- Hobbies: {hobbies}
- Strengths: {strengths}
- Ideal work environment: {work_environment}
- Preferred work style: {work_style}
- Salary expectation: {salary_expectation}
- Willingness to put in effort: {effort_willingness}

Please include the following:
1. Suitable career directions (3-5 concrete careers)
2. A detailed analysis and development prospects for each career
3. The skills and knowledge that need to be developed
4. A suggested learning path
5. Short-term and long-term goal planning

Please use a warm, encouraging tone and give practical, instructive advice.
",
        favorite_subject = input.favorite_subject(),
        hobbies = input.hobbies(),
        strengths = input.strengths(),
        work_environment = input.work_environment(),
        work_style = input.work_style(),
        salary_expectation = input.salary_expectation(),
        effort_willingness = input.effort_willingness(),
    )
}
