//! Server-Rendered Edit Page
//!
//! Renders a submission into an HTML form pre-populated with its current
//! values. The form posts `{ id, updatedData }` as JSON to `/update`. After
//! the deadline the same page is rendered read-only.

use chrono::{DateTime, Utc};

use crate::backend::notify::messages::format_deadline;
use crate::shared::{AbstractType, SubmissionView};

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const SCRIPT: &str = r#"<script>
document.getElementById('edit-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.target;
  const updatedData = Object.fromEntries(new FormData(form).entries());
  const status = document.getElementById('status');
  const response = await fetch('/update', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ id: Number(form.dataset.id), updatedData }),
  });
  const body = await response.json();
  status.textContent = response.ok ? body.message : body.error;
});
</script>"#;

fn text_input(html: &mut String, name: &str, label: &str, value: &str, disabled: &str) {
    html.push_str(&format!(
        "<label>{label}<input type=\"text\" name=\"{name}\" value=\"{value}\" required{disabled}></label>\n",
        label = label,
        name = name,
        value = escape_html(value),
        disabled = disabled,
    ));
}

/// Render the edit form for `view`
///
/// `editing_open` controls whether inputs are enabled and the save button
/// is shown.
pub fn render_edit_page(view: &SubmissionView, deadline: DateTime<Utc>, editing_open: bool) -> String {
    let fields = &view.fields;
    let disabled = if editing_open { "" } else { " disabled" };

    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Edit Submission {id}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/styles.css\">\n</head>\n<body>\n\
         <h1>Edit Submission {id}</h1>\n",
        id = view.unique_id
    );

    if editing_open {
        html.push_str(&format!("<p>Editing closes {}.</p>\n", format_deadline(deadline)));
    } else {
        html.push_str(&format!(
            "<p class=\"notice\">The editing deadline ({}) has passed. This submission is read-only.</p>\n",
            format_deadline(deadline)
        ));
    }

    html.push_str(&format!("<form id=\"edit-form\" data-id=\"{}\">\n", view.unique_id));
    text_input(&mut html, "submitterName", "Name", &fields.submitter_name, disabled);
    text_input(&mut html, "submitterEmail", "Email", &fields.submitter_email, disabled);
    text_input(&mut html, "abstractTitle", "Abstract title", &fields.abstract_title, disabled);

    html.push_str(&format!("<label>Abstract type<select name=\"abstractType\"{}>", disabled));
    for kind in [AbstractType::TechnicalPaper, AbstractType::Poster] {
        let selected = if kind == fields.abstract_type { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{kind}\"{selected}>{kind}</option>"));
    }
    html.push_str("</select></label>\n");

    text_input(&mut html, "theme", "Theme", &fields.theme, disabled);
    text_input(&mut html, "company", "Company", &fields.company, disabled);
    text_input(&mut html, "discipline", "Discipline", &fields.discipline, disabled);
    text_input(&mut html, "authorNames", "Authors", &fields.author_names, disabled);
    html.push_str(&format!(
        "<label>Abstract<textarea name=\"abstractContent\" rows=\"12\" required{}>{}</textarea></label>\n",
        disabled,
        escape_html(&fields.abstract_content)
    ));

    if editing_open {
        html.push_str("<button type=\"submit\">Save changes</button>\n");
    }
    html.push_str("</form>\n<p id=\"status\"></p>\n");
    if editing_open {
        html.push_str(SCRIPT);
        html.push('\n');
    }
    html.push_str("</body>\n</html>\n");
    html
}
