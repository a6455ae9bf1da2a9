//! 邮件模板
//!
//! 模板在编译时由 rust-embed 从 templates/ 目录嵌入，占位符形如 `{{name}}`，替换值会做 HTML 转义。

use rust_embed::Embed;

use crate::errors::{Result, ScorelyError};

#[derive(Embed)]
#[folder = "templates/"]
struct MailTemplates;

const INVITATION_TEMPLATE: &str = "invitation.html";

/// 邀请邮件的模板参数
#[derive(Debug, Clone)]
pub struct InvitationEmail<'a> {
    pub student_name: &'a str,
    pub course: &'a str,
    pub link: &'a str,
}

impl InvitationEmail<'_> {
    pub fn subject(&self) -> String {
        format!("Invitación al curso: {}", self.course)
    }

    pub fn render(&self) -> Result<String> {
        render_template(
            INVITATION_TEMPLATE,
            &[
                ("student_name", self.student_name),
                ("course", self.course),
                ("link", self.link),
            ],
        )
    }
}

fn load_template(name: &str) -> Result<String> {
    let file = MailTemplates::get(name)
        .ok_or_else(|| ScorelyError::template(format!("Template not found: {name}")))?;

    String::from_utf8(file.data.into_owned())
        .map_err(|e| ScorelyError::template(format!("Template {name} is not valid UTF-8: {e}")))
}

/// 渲染模板，替换所有 `{{key}}` 占位符
pub fn render_template(name: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut html = load_template(name)?;
    for (key, value) in vars {
        html = html.replace(&format!("{{{{{key}}}}}"), &escape_html(value));
    }
    Ok(html)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_invitation_replaces_placeholders() {
        let email = InvitationEmail {
            student_name: "Ana Quispe",
            course: "Algebra",
            link: "http://localhost:5173/invitaciones/aceptar?token=abc",
        };
        let html = email.render().unwrap();

        assert!(html.contains("Hola, Ana Quispe"));
        assert!(html.contains("<strong>Algebra</strong>"));
        assert!(html.contains("href=\"http://localhost:5173/invitaciones/aceptar?token=abc\""));
        assert!(!html.contains("{{"));
        assert_eq!(email.subject(), "Invitación al curso: Algebra");
    }

    #[test]
    fn test_values_are_html_escaped() {
        let email = InvitationEmail {
            student_name: "<script>alert(1)</script>",
            course: "R&D",
            link: "x",
        };
        let html = email.render().unwrap();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("R&amp;D"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let err = render_template("missing.html", &[]).unwrap_err();
        assert_eq!(err.code(), "E011");
    }
}
