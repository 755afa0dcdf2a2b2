use askama::{Error, Template};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmailTemplateData {
    pub title: String,
    pub greeting: String,
    pub message: String,
    pub button: String,
    pub link: String,
}

#[derive(Template, Debug)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub title: &'a str,
    pub greeting: &'a str,
    pub message: &'a str,
    pub button: &'a str,
    pub link: &'a str,
}

impl<'a> From<&'a EmailTemplateData> for EmailTemplate<'a> {
    fn from(data: &'a EmailTemplateData) -> Self {
        EmailTemplate {
            title: data.title.as_str(),
            greeting: data.greeting.as_str(),
            message: data.message.as_str(),
            button: data.button.as_str(),
            link: data.link.as_str(),
        }
    }
}

pub fn render_email(data: &EmailTemplateData) -> Result<String, Error> {
    debug!("📧 Rendering email template: {}", data.title);

    EmailTemplate::from(data).render().map_err(|e| {
        error!("❌ Failed to render email template: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes_and_embeds_link() {
        let data = EmailTemplateData {
            title: "Activate your account".into(),
            greeting: "Hi <alice>".into(),
            message: "Please use the link below to verify your account.".into(),
            button: "Activate".into(),
            link: "http://localhost:8000/activate-user/NDI/abc".into(),
        };

        let html = render_email(&data).unwrap();

        assert!(html.contains("http://localhost:8000/activate-user/NDI/abc"));
        assert!(html.contains("Hi &#60;alice&#62;") || html.contains("Hi &lt;alice&gt;"));
        assert!(!html.contains("<alice>"));
    }
}
