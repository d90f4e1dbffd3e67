// Prompt text for the résumé analysis call.
// The client sends these to the model; the response comes back through
// `analysis::extract_json` and `feedback::transform`.

/// Schema the model is asked to answer with. Mirrors `feedback::models::Feedback`.
pub const AI_RESPONSE_FORMAT: &str = r#"
interface Feedback {
  overallScore: number; // 0-100 composite score
  ATS: {
    score: number; // holistic ATS readiness
    keywordMatch: number; // keyword coverage percentage
    formattingScore: number; // layout compliance
    readabilityScore: number; // sentence clarity / bullet structure
    complianceScore: number; // alignment to ATS friendly best practices
    parsingConfidence: number; // how well the resume can be parsed
    matchedKeywords: string[]; // keywords already present verbatim
    missingKeywords: string[]; // keywords to add verbatim
    redFlags: string[]; // structural blockers that may cause rejection
    priorityFixes: string[]; // 2-4 high-impact tasks to improve ATS score
    tips: {
      type: "good" | "improve";
      tip: string;
      explanation: string;
    }[]; // 3-5 total, each with explanation
  };
  toneAndStyle: {
    score: number;
    tips: { type: "good" | "improve"; tip: string; explanation: string; }[];
  };
  content: {
    score: number;
    tips: { type: "good" | "improve"; tip: string; explanation: string; }[];
  };
  structure: {
    score: number;
    tips: { type: "good" | "improve"; tip: string; explanation: string; }[];
  };
  skills: {
    score: number;
    tips: { type: "good" | "improve"; tip: string; explanation: string; }[];
  };
}"#;

/// Analysis prompt template. Replace `{job_title}`, `{job_description}` and
/// `{response_format}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = "You are an expert in ATS (Applicant Tracking System) and resume analysis.
Please analyze and rate this resume and suggest how to improve it.
The rating can be low if the resume is bad.
Be thorough and detailed. Don't be afraid to point out any mistakes or areas for improvement.
If there is a lot to improve, don't hesitate to give low scores. This is to help the user to improve their resume.
If available, use the job description for the job the user is applying to to give more detailed feedback.
The job title is: {job_title}
The job description is: {job_description}
Provide the feedback using the following format: {response_format}
Return the analysis as a JSON object, without any other text and without the backticks.
Do not include any other text or comments.";

pub fn prepare_instructions(job_title: &str, job_description: &str) -> String {
    render(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{job_title}", job_title),
            ("{job_description}", job_description),
            ("{response_format}", AI_RESPONSE_FORMAT),
        ],
    )
}

/// Fills placeholders in one pass over the template. Substituted text is never
/// scanned again, so user input containing `{...}` stays literal.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
