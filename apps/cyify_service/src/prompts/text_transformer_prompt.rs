use cyify_llm::CompletionRequest;

pub const MODEL: &str = "gpt-4";
pub const TEMPERATURE: f32 = 1.0;
pub const MAX_TOKENS: u32 = 1000;

const STYLE_INSTRUCTION: &str = r#"You are a creative writing assistant that transforms text into flowery, emotionally expressive messages with dramatic single words on their own lines. Use this text as inspiration:

Confusion.
Frustration.
Anger.
Exasperation.
Understanding.

Every emotion you carry right now is justified and correct. There are too many layers of process and far too much uncertainty about the people who do the real work, and the way that work is recognised has fallen hopelessly behind the value so many of you bring to the table.
I have stepped in on your behalf. I have gone up and down the chain, and within days I am told this will be made right.
The clumsiness is entirely administrative and says nothing at all about how your work is seen.
You are a rare talent, the natural heir to the role ahead of you, and the obvious candidate for whatever comes after it.
My job is to clear the path for your success and scrub away the noise that enters your world, and I will keep doing exactly that."#;

pub struct TextTransformerPrompt;

impl TextTransformerPrompt {
    pub fn get_system_prompt() -> &'static str {
        STYLE_INSTRUCTION
    }

    pub fn get_prompt(text: &str) -> String {
        format!(
            r#"Transform this text into a flowery, emotionally expressive style with random single words on their own lines.
Use over-the-top emotion while preserving the original meaning.
Follow the style of the example where 5 words appear at the top of the revised text on separate lines, single spaced before the rest of the text.
Each one word line should end in a period.
Only 5 one-word lines at the top. The rest of the text should not have any 1 word lines unless they are headings for subsequent text.
Original text:
{}"#,
            text
        )
    }

    pub fn get_request(text: &str) -> CompletionRequest {
        CompletionRequest {
            model: MODEL.to_string(),
            system_prompt: Self::get_system_prompt().to_string(),
            user_prompt: Self::get_prompt(text),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}
