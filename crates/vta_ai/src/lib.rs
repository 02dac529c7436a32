pub mod answer;
pub mod api;
pub mod llm;
pub mod ocr;
pub mod prompt;
pub mod retrieve;

#[cfg(test)]
mod tests {
    use super::answer::degraded_answer;
    use super::llm::{OpenAiConfig, OpenAiLlm};
    use super::ocr::{NoopOcr, Ocr};

    fn config(base_url: &str) -> OpenAiConfig {
        OpenAiConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn enforces_http_base_urls() {
        assert!(OpenAiLlm::new(config("https://api.openai.com/v1")).is_ok());
        assert!(OpenAiLlm::new(config("http://127.0.0.1:8080/v1")).is_ok());

        assert!(OpenAiLlm::new(config("ftp://api.openai.com")).is_err());
        assert!(OpenAiLlm::new(config("api.openai.com/v1")).is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let llm = OpenAiLlm::new(config("https://api.openai.com/v1/")).unwrap();
        assert_eq!(llm.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn rejects_blank_credentials_and_model() {
        let mut cfg = config("https://api.openai.com/v1");
        cfg.api_key = "  ".to_string();
        assert!(OpenAiLlm::new(cfg).is_err());

        let mut cfg = config("https://api.openai.com/v1");
        cfg.model = String::new();
        assert!(OpenAiLlm::new(cfg).is_err());
    }

    #[test]
    fn fallback_answer_is_presentable() {
        let a = degraded_answer();
        assert!(!a.text.is_empty());
        assert!(a.links.is_empty());
    }

    #[test]
    fn noop_ocr_yields_no_text() {
        assert_eq!(NoopOcr.extract_text(b"\x89PNG"), "");
    }
}
