//! Compiled-in starter templates.

use crate::bundle::SourceBundle;
use serde::Serialize;

/// A starter project offered when creating a new project.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub markup: &'static str,
    pub style: &'static str,
    pub script: &'static str,
}

impl Template {
    /// Owned copy of the template's sources.
    pub fn bundle(&self) -> SourceBundle {
        SourceBundle::new(self.markup, self.style, self.script)
    }
}

/// Id of the template used as the compiled-in default project.
pub const DEFAULT_TEMPLATE_ID: &str = "blank";

const TEMPLATES: &[Template] = &[
    Template {
        id: "blank",
        name: "Blank Project",
        description: "Start with a clean slate",
        markup: r#"<!DOCTYPE html>
<html>
<head>
  <title>My Project</title>
</head>
<body>
  <h1>Hello World!</h1>
  <p>Start coding to see your changes here.</p>
</body>
</html>"#,
        style: r#"body {
  font-family: system-ui, sans-serif;
  line-height: 1.5;
  color: #333;
  max-width: 800px;
  margin: 0 auto;
  padding: 1rem;
}

h1 {
  color: #0070f3;
}"#,
        script: r#"// Your JavaScript code here
console.log('Hello from JavaScript!');

document.addEventListener('DOMContentLoaded', () => {
  // DOM is ready
});
"#,
    },
    Template {
        id: "landing",
        name: "Landing Page",
        description: "Simple landing page with navigation, hero and features",
        markup: r##"<!DOCTYPE html>
<html>
<head>
  <title>Landing Page</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body>
  <header>
    <nav>
      <div class="logo">Brand</div>
      <ul>
        <li><a href="#features">Features</a></li>
        <li><a href="#pricing">Pricing</a></li>
        <li><a href="#contact">Contact</a></li>
      </ul>
    </nav>
  </header>
  <section class="hero">
    <h1>Build something great</h1>
    <p>A short pitch that explains what the product does.</p>
    <button id="cta">Get started</button>
  </section>
  <section id="features" class="features">
    <article><h2>Fast</h2><p>Loads in a blink.</p></article>
    <article><h2>Simple</h2><p>No setup required.</p></article>
    <article><h2>Open</h2><p>Share with one link.</p></article>
  </section>
  <footer id="contact">&copy; Brand</footer>
</body>
</html>"##,
        style: r#"* { box-sizing: border-box; }

body {
  margin: 0;
  font-family: system-ui, sans-serif;
  color: #222;
}

nav {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 1rem 2rem;
  background: #111;
  color: #fff;
}

nav ul {
  display: flex;
  gap: 1.5rem;
  list-style: none;
  margin: 0;
  padding: 0;
}

nav a { color: inherit; text-decoration: none; }

.hero {
  text-align: center;
  padding: 5rem 1rem;
  background: linear-gradient(135deg, #0070f3, #7928ca);
  color: #fff;
}

.hero button {
  padding: 0.75rem 1.5rem;
  border: 0;
  border-radius: 999px;
  font-size: 1rem;
  cursor: pointer;
}

.features {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 2rem;
  padding: 3rem 2rem;
}

footer { text-align: center; padding: 2rem; color: #777; }"#,
        script: r#"document.getElementById('cta').addEventListener('click', () => {
  document.getElementById('features').scrollIntoView({ behavior: 'smooth' });
});
"#,
    },
    Template {
        id: "interactive",
        name: "Interactive Demo",
        description: "Counter and to-do list wired up with plain JavaScript",
        markup: r#"<!DOCTYPE html>
<html>
<head>
  <title>Interactive Demo</title>
</head>
<body>
  <main>
    <section class="card">
      <h2>Counter</h2>
      <p id="count">0</p>
      <button data-step="-1">-</button>
      <button data-step="1">+</button>
    </section>
    <section class="card">
      <h2>To-do</h2>
      <form id="todo-form">
        <input id="todo-input" placeholder="Add a task" autocomplete="off">
        <button type="submit">Add</button>
      </form>
      <ul id="todo-list"></ul>
    </section>
  </main>
</body>
</html>"#,
        style: r#"body {
  font-family: system-ui, sans-serif;
  background: #f4f4f5;
  margin: 0;
  padding: 2rem;
}

main {
  display: grid;
  gap: 1.5rem;
  max-width: 480px;
  margin: 0 auto;
}

.card {
  background: #fff;
  border-radius: 12px;
  padding: 1.5rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

#count { font-size: 3rem; margin: 0.5rem 0; }

li.done { text-decoration: line-through; color: #999; }"#,
        script: r#"let count = 0;
const countEl = document.getElementById('count');
document.querySelectorAll('[data-step]').forEach((button) => {
  button.addEventListener('click', () => {
    count += Number(button.dataset.step);
    countEl.textContent = count;
  });
});

const form = document.getElementById('todo-form');
const input = document.getElementById('todo-input');
const list = document.getElementById('todo-list');
form.addEventListener('submit', (event) => {
  event.preventDefault();
  const text = input.value.trim();
  if (!text) return;
  const item = document.createElement('li');
  item.textContent = text;
  item.addEventListener('click', () => item.classList.toggle('done'));
  list.appendChild(item);
  input.value = '';
});
"#,
    },
];

/// All templates in catalog order.
pub fn all() -> &'static [Template] {
    TEMPLATES
}

/// Look up a template by id.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// The compiled-in default project.
pub fn default_bundle() -> SourceBundle {
    find(DEFAULT_TEMPLATE_ID)
        .map(Template::bundle)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_bundle;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_resolvable() {
        let ids: HashSet<_> = all().iter().map(|template| template.id).collect();
        assert_eq!(ids.len(), all().len());
        for id in ["blank", "landing", "interactive"] {
            assert_eq!(find(id).map(|template| template.id), Some(id));
        }
        assert!(find("missing").is_none());
    }

    #[test]
    fn default_bundle_is_the_blank_template() {
        let bundle = default_bundle();
        assert!(bundle.markup.contains("<h1>Hello World!</h1>"));
        assert!(bundle.style.contains("#0070f3"));
        assert!(bundle.script.contains("DOMContentLoaded"));
    }

    #[test]
    fn every_template_composes_into_head_and_body() {
        for template in all() {
            let document = compose_bundle(&template.bundle());
            assert!(
                document.contains(&format!("<style>{}</style></head>", template.style)),
                "template {}",
                template.id
            );
            assert!(
                document.contains(&format!("<script>{}</script></body>", template.script)),
                "template {}",
                template.id
            );
        }
    }

    #[test]
    fn landing_markup_keeps_in_page_anchors() {
        let landing = find("landing").expect("landing template");
        for anchor in ["#features", "#pricing", "#contact"] {
            assert!(
                landing.markup.contains(&format!("href=\"{}\"", anchor)),
                "anchor {}",
                anchor
            );
        }
        assert!(landing.markup.trim_end().ends_with("</html>"));
        assert!(landing.style.starts_with("* { box-sizing"));
    }
}
