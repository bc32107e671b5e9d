//! Prompt templates for the three generation endpoints.

/// Named rewrite styles for content enhancement.
const ENHANCEMENT_PROMPTS: &[(&str, &str)] = &[
    (
        "improve",
        "Improve the writing quality, clarity, and flow of this content while maintaining its core message.",
    ),
    (
        "expand",
        "Expand this content with more details, examples, and comprehensive information.",
    ),
    (
        "simplify",
        "Simplify this content to make it easier to understand for a broader audience.",
    ),
    (
        "professional",
        "Rewrite this content in a more professional and formal tone.",
    ),
    (
        "engaging",
        "Make this content more engaging, interesting, and compelling for the audience.",
    ),
    (
        "technical",
        "Add more technical details, specifications, and in-depth information to this content.",
    ),
];

/// Example document embedded in the slide-generation prompt so the model
/// mirrors the persisted layout.
const SLIDE_EXAMPLE: &str = r##"{
  "slides": [
    {
      "id": "slide-1",
      "title": "Welcome",
      "summary": "Introduction to the course",
      "elements": [
        {
          "id": "el-1",
          "type": "text",
          "content": "Welcome to the interactive course!",
          "x": 60,
          "y": 80,
          "fontSize": 24
        },
        {
          "id": "el-2",
          "type": "list",
          "content": "First point\nSecond point",
          "x": 80,
          "y": 220,
          "width": 340,
          "height": 120,
          "fontSize": 16,
          "animation": "slideInLeft",
          "fragmentIndex": 1
        }
      ],
      "backgroundColor": "#1d2a4d",
      "transition": "convex",
      "transitionSpeed": "fast"
    }
  ],
  "exportedAt": "2025-08-14T11:20:47.679Z",
  "format": "slide-editor-v2",
  "version": "2.0.0"
}"##;

/// Build the slide-generation prompt.
pub fn slide_generation(
    topic: &str,
    slide_count: u32,
    audience: &str,
    style: &str,
    custom_prompt: Option<&str>,
) -> String {
    let base = match custom_prompt {
        Some(custom) if !custom.trim().is_empty() => custom.to_string(),
        _ => format!(
            "Create {slide_count} slides about \"{topic}\" for a {audience} audience in {style} style."
        ),
    };

    format!(
        "{base}\n\n\
        You are given raw notes or descriptions for one or more presentation slides.\n\
        For each slide, transform the provided content into a JSON object with the following structure:\n\n\
        {SLIDE_EXAMPLE}\n\n\
        Rules:\n\
        1. Title must be short, clear, and engaging.\n\
        2. Summary should capture the essence of the slide in one sentence.\n\
        3. Include 2-4 main elements per slide; choose \"text\" for paragraphs, \"list\" for bullet points, \"code\" for source snippets.\n\
        4. Position should be realistic coordinates for placing content on a slide canvas.\n\
        5. Transcript should be a smooth, conversational explanation expanding on the content.\n\
        6. Give each slide a background color or image that matches the theme; do not leave it white.\n\
        7. Output only valid JSON; no extra commentary.\n\
        8. If you cannot generate a slide, return an empty array for slides.\n\
        9. Do not generate image elements.\n\n\
        The topic is {topic}, generate exactly {slide_count} slides for a {audience} audience in {style} style."
    )
}

/// Build the quiz-generation prompt.
pub fn quiz_generation(content: &str, difficulty: &str, question_count: u32) -> String {
    format!(
        "Create {question_count} multiple-choice quiz question(s) based on this content at {difficulty} difficulty level:\n\n\
        \"{content}\"\n\n\
        Format as JSON with this exact structure:\n\
        {{\n\
        \x20 \"question\": \"Question text here?\",\n\
        \x20 \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n\
        \x20 \"correct\": 0,\n\
        \x20 \"explanation\": \"Brief explanation of why this is correct\"\n\
        }}\n\n\
        For multiple questions, use {{\"questions\": [ ... ]}} with the same per-question shape.\n\n\
        Make sure:\n\
        - Questions are clear and unambiguous\n\
        - All options are plausible\n\
        - The correct answer index is accurate (0-based)\n\
        - Difficulty matches the requested level: {difficulty}\n\
        - Content is educational and appropriate"
    )
}

/// Build the content-enhancement prompt.
pub fn enhancement(
    content: &str,
    enhancement_type: Option<&str>,
    instructions: Option<&str>,
    element_type: &str,
) -> String {
    let base = ENHANCEMENT_PROMPTS
        .iter()
        .find(|(name, _)| Some(*name) == enhancement_type)
        .map(|(_, prompt)| *prompt)
        .unwrap_or(ENHANCEMENT_PROMPTS[0].1);

    let extra = match instructions {
        Some(text) if !text.trim().is_empty() => format!("Additional instructions: {text}\n\n"),
        _ => String::new(),
    };

    format!(
        "{base}\n\n\
        Original content ({element_type} element):\n\
        \"{content}\"\n\n\
        {extra}\
        Please provide only the enhanced content without any explanations or formatting markers. \
        Keep it suitable for a {element_type} element in a presentation slide."
    )
}
