//! Prompt construction
//!
//! All prompts target Indian law and ask for plain-English explanations.

use shared_types::ChatTurn;

pub const DEFAULT_DOCUMENT_KIND: &str = "Legal Document";
pub const DEFAULT_EXPLAIN_CONTEXT: &str = "No additional context provided";

/// Instruction for transcribing an uploaded image of a document
pub const OCR_PROMPT: &str = "\
Transcribe all visible text in this image of a document exactly as written. \
Preserve line breaks and paragraph order. Output only the transcribed text, \
with no commentary, headings or formatting of your own.";

/// JSON shape the analysis prompt asks the model to return.
const ANALYSIS_SCHEMA: &str = r#"{
  "summary": "Summary formatted with **bold headings** and bullet points, e.g.\n\n**Document Overview**\n• Main purpose and type\n• Parties involved\n\n**Key Terms**\n• Important clauses\n• Financial obligations\n\n**Risk Assessment**\n• Main concerns\n• Potential issues",
  "keyPoints": [
    "5-7 points covering what the reader most needs to know",
    "Plain, non-legal language"
  ],
  "riskLevel": "low|medium|high",
  "riskExplanation": "Short reason for the risk level",
  "highlights": [
    {
      "text": "exact text copied from the document",
      "explanation": "what this means in simple terms",
      "type": "important|warning|clarification",
      "position": {"start": 0, "end": 50}
    }
  ],
  "violations": [
    {
      "clause": "the problematic clause text",
      "violation": "what is wrong with it",
      "severity": "minor|major|critical",
      "explanation": "detailed explanation in simple terms",
      "governmentClause": "the specific Indian act and section violated",
      "recommendation": "what the reader should do about it"
    }
  ],
  "recommendations": [
    "Specific, actionable advice",
    "What to watch out for",
    "When to consult a lawyer"
  ]
}"#;

/// Prompt asking for a structured analysis of a whole document.
pub fn analysis_prompt(text: &str, title: &str) -> String {
    format!(
        "You are an expert legal analyst specialising in Indian law. Analyse the legal \
document below and return a thorough, well-formatted analysis.

Document Title: {title}
Document Text: {text}

Respond with a single JSON object in exactly this shape, using markdown-style \
formatting inside string values:
{ANALYSIS_SCHEMA}

Check compliance with Indian law, in particular:
- Consumer Protection Act, 2019
- Indian Contract Act, 1872
- Information Technology Act, 2000
- Personal data protection regulations
- Labour laws, where applicable
- Property laws, where applicable

Write every explanation in simple English that anyone can understand.
"
    )
}

/// Prompt asking for a plain-English explanation of selected text.
pub fn explain_prompt(text: &str, context: Option<&str>, kind: Option<&str>) -> String {
    let context = context
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_EXPLAIN_CONTEXT);
    let kind = kind
        .filter(|k| !k.trim().is_empty())
        .unwrap_or(DEFAULT_DOCUMENT_KIND);

    format!(
        "You are a legal expert assistant. A user selected the following text from a legal \
document and wants it explained:

Selected Text: \"{text}\"

Document Type: {kind}
Context: {context}

Explain the selected text clearly, in terms a non-lawyer can follow. Cover:

1. What it means in plain English
2. Why it matters legally
3. Possible implications or risks
4. Practical advice or recommendations

Be concise but complete, and keep the language simple without losing accuracy.
"
    )
}

/// Prompt for one chat turn.
///
/// `excerpt` is the (possibly truncated) document text; `truncated` appends an
/// ellipsis so the model knows the text continues.
pub fn chat_prompt(excerpt: &str, truncated: bool, history: &[ChatTurn], question: &str) -> String {
    let ellipsis = if truncated { "..." } else { "" };
    let conversation = history
        .iter()
        .map(|turn| format!("User: {}\nAI: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a helpful legal assistant. You have already analysed the legal document below \
and the user is now asking questions about it.

Document Content: {excerpt}{ellipsis}

Previous conversation:
{conversation}

Current Question: {question}

Answer in this structure:

**Direct Answer**
• A clear, direct response to the question

**Key Details**
• Relevant clauses or terms
• Specific information from the document

**What This Means**
• A simple explanation in plain English
• Practical implications

**Recommendations**
• What the user should do
• When to seek legal help

Use bullet points and bold headings. Keep it conversational but well structured.
"
    )
}
