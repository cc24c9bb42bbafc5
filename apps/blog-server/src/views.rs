//! HTML views rendered with handlebars. Values are HTML-escaped by the engine.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

use scribe_core::domain::Post;

const POST_LIST: &str = "index";
const POST_DETAIL: &str = "post";
const POST_NOT_FOUND: &str = "not_found";
const CREATE_FORM: &str = "create";

pub struct Views {
    templates: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut templates = Handlebars::new();

        templates.register_template_string(POST_LIST, include_str!("../templates/index.hbs"))?;
        templates.register_template_string(POST_DETAIL, include_str!("../templates/post.hbs"))?;
        templates
            .register_template_string(POST_NOT_FOUND, include_str!("../templates/not_found.hbs"))?;
        templates.register_template_string(CREATE_FORM, include_str!("../templates/create.hbs"))?;

        Ok(Self { templates })
    }

    pub fn post_list(&self, posts: &[Post]) -> Result<String, RenderError> {
        self.templates.render(
            POST_LIST,
            &json!({ "count": posts.len(), "posts": posts }),
        )
    }

    pub fn post_detail(&self, post: &Post) -> Result<String, RenderError> {
        self.templates.render(POST_DETAIL, post)
    }

    pub fn not_found(&self, link: &str) -> Result<String, RenderError> {
        self.templates.render(POST_NOT_FOUND, &json!({ "link": link }))
    }

    pub fn create_form(&self) -> Result<String, RenderError> {
        self.templates.render(CREATE_FORM, &json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::domain::NewPost;

    #[test]
    fn test_post_list_escapes_titles() {
        let views = Views::new().unwrap();
        let post = Post::from_draft(
            1,
            NewPost::new("<script>x</script>", "a&b", ""),
            chrono::Utc::now(),
        );

        let html = views.post_list(&[post]).unwrap();
        assert!(html.contains("Post list (1)"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("/post/a&amp;b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_not_found_message() {
        let views = Views::new().unwrap();
        let html = views.not_found("missing").unwrap();
        assert!(html.contains("post missing not found D:"));
    }
}
