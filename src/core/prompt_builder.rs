// Builds the instruction string for a generation request

const PREAMBLE: &str = "You are an AI that generates fantasy characters for roleplaying games. \
Return only JSON with a \"name\" and a \"description\" field.";

const ONE_SHOT_EXAMPLE: &str = r#"Example format:
{
  "name": "Zariah Thornroot",
  "description": "A cunning herbalist who trades in secrets as often as roots."
}"#;

const CONTEXT_HEADING: &str =
    "Use the following notes from the user's world as context. Fit the character into it:";

/// Preamble, one-shot example, then the collected context if there is any
pub fn build_instructions(context: &str) -> String {
    let mut instructions = format!("{}\n\n{}\n", PREAMBLE, ONE_SHOT_EXAMPLE);
    if !context.is_empty() {
        instructions.push('\n');
        instructions.push_str(CONTEXT_HEADING);
        instructions.push_str("\n\n");
        instructions.push_str(context);
    }
    instructions
}
