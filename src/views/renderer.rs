//! Renderizado de plantillas HTML
//!
//! Las plantillas usan marcadores `{{ clave }}`. Todo valor insertado con
//! `Context::with` se escapa. El único camino sin escape es
//! `Context::with_rendered`, que solo acepta `Html` producido por este módulo.

use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::fmt::Display;

use crate::utils::errors::AppError;

/// Markup ya renderizado y seguro para incrustar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Concatena fragmentos renderizados (filas de una tabla, por ejemplo)
    pub fn concat(fragments: impl IntoIterator<Item = Html>) -> Html {
        Html(fragments.into_iter().map(|fragment| fragment.0).collect())
    }
}

impl IntoResponse for Html {
    fn into_response(self) -> Response {
        axum::response::Html(self.0).into_response()
    }
}

/// Valores disponibles para una plantilla, ya escapados
#[derive(Debug, Default)]
pub struct Context {
    values: HashMap<&'static str, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un valor escapándolo para HTML
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        let raw = value.to_string();
        self.values
            .insert(key, html_escape::encode_safe(&raw).into_owned());
        self
    }

    /// Inserta markup sin escapar. Solo admite `Html` salido de `render`.
    pub fn with_rendered(mut self, key: &'static str, html: Html) -> Self {
        self.values.insert(key, html.0);
        self
    }
}

fn template_source(name: &str) -> Option<&'static str> {
    let source = match name {
        "layout" => include_str!("../../templates/layout.html"),
        "dashboard" => include_str!("../../templates/dashboard.html"),
        "alert_row" => include_str!("../../templates/alert_row.html"),
        "units" => include_str!("../../templates/units.html"),
        "unit_row" => include_str!("../../templates/unit_row.html"),
        "unit_detail" => include_str!("../../templates/unit_detail.html"),
        "status_option" => include_str!("../../templates/status_option.html"),
        "error" => include_str!("../../templates/error.html"),
        "error_detail" => include_str!("../../templates/error_detail.html"),
        _ => return None,
    };
    Some(source)
}

/// Renderiza la plantilla `template_name` con el contexto dado
pub fn render(template_name: &str, context: &Context) -> Result<Html, AppError> {
    let source = template_source(template_name)
        .ok_or_else(|| AppError::Template(format!("unknown template '{}'", template_name)))?;

    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            AppError::Template(format!("unclosed placeholder in '{}'", template_name))
        })?;

        let key = after[..end].trim();
        let value = context.values.get(key).ok_or_else(|| {
            AppError::Template(format!("missing key '{}' for '{}'", key, template_name))
        })?;
        output.push_str(value);
        rest = &after[end + 2..];
    }
    output.push_str(rest);

    Ok(Html(output))
}

/// Envuelve el cuerpo de una página en el layout común
pub fn render_page(title: impl Display, body: Html) -> Result<Html, AppError> {
    render(
        "layout",
        &Context::new().with("title", title).with_rendered("body", body),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_escaped() {
        let html = render(
            "error_detail",
            &Context::new()
                .with("field", "name")
                .with("message", "<script>alert(1)</script>"),
        )
        .unwrap();

        assert!(!html.as_str().contains("<script>"));
        assert!(html.as_str().contains("&lt;script&gt;"));
    }

    #[test]
    fn test_rendered_fragments_are_nested_verbatim() {
        let row = render(
            "error_detail",
            &Context::new().with("field", "status").with("message", "bad"),
        )
        .unwrap();
        let page = render_page("Title & more", row.clone()).unwrap();

        assert!(page.as_str().contains(row.as_str()));
        assert!(page.as_str().contains("<title>Title &amp; more</title>"));
    }

    #[test]
    fn test_placeholders_in_values_are_not_expanded() {
        let html = render(
            "error_detail",
            &Context::new().with("field", "{{ message }}").with("message", "x"),
        )
        .unwrap();
        assert!(html.as_str().contains("{{ message }}: x"));
    }

    #[test]
    fn test_missing_key_and_unknown_template() {
        let missing = render("error_detail", &Context::new().with("field", "x"));
        assert!(matches!(missing, Err(AppError::Template(_))));

        let unknown = render("../../Cargo.toml", &Context::new());
        assert!(matches!(unknown, Err(AppError::Template(_))));
    }

    #[test]
    fn test_compiled_templates() {
        let known = [
            "layout",
            "dashboard",
            "alert_row",
            "units",
            "unit_row",
            "unit_detail",
            "status_option",
            "error",
            "error_detail",
        ];
        for name in known {
            assert!(template_source(name).is_some(), "missing template {}", name);
        }
        assert!(template_source("maintenance").is_none());
    }

    #[test]
    fn test_concat() {
        let option = |value: &str, selected: &str| {
            render(
                "status_option",
                &Context::new().with("value", value).with("selected", selected),
            )
            .unwrap()
        };
        let a = option("Active", "");
        let b = option("Offline", "selected");
        let joined = Html::concat(vec![a.clone(), b.clone()]);
        assert_eq!(joined.as_str(), format!("{}{}", a.as_str(), b.as_str()));
    }
}
