//! Splices markup, style, and script into one previewable HTML document.
//!
//! Detection is literal, case-sensitive substring matching on the first
//! occurrence of each marker. Marker text inside comments or string literals is
//! matched too.

use crate::bundle::SourceBundle;

const HEAD_CLOSE: &str = "</head>";
const HTML_OPEN: &str = "<html>";
const BODY_CLOSE: &str = "</body>";

/// Preview-only script that keeps `ResizeObserver` loop errors raised by user
/// code from surfacing as uncaught errors inside the preview frame.
const PREVIEW_GUARD_SCRIPT: &str = r#"<script>
(function () {
  var Native = window.ResizeObserver;
  if (Native) {
    window.ResizeObserver = class extends Native {
      constructor(callback) {
        super(function () {
          try { callback.apply(this, arguments); } catch (e) {}
        });
      }
      observe() {
        try { return super.observe.apply(this, arguments); }
        catch (e) { console.warn('ResizeObserver error suppressed', e); }
      }
      unobserve() {
        try { return super.unobserve.apply(this, arguments); }
        catch (e) { console.warn('ResizeObserver error suppressed', e); }
      }
    };
  }
  var nativeError = console.error;
  console.error = function () {
    var first = arguments[0];
    if (typeof first === 'string' && first.indexOf('ResizeObserver') !== -1) {
      return;
    }
    return nativeError.apply(this, arguments);
  };
})();
</script>"#;

/// Compose a standalone document from the three source buffers.
///
/// 1. Style goes before the first `</head>`; failing that, a synthesized head
///    goes right after the first `<html>`; failing that, the markup is wrapped
///    in a full skeleton.
/// 2. Script goes before the first `</body>`, or is appended at the end.
///
/// Never fails and has no side effects.
pub fn compose(markup: &str, style: &str, script: &str) -> String {
    let style_block = format!("<style>{}</style>", style);
    let script_block = format!("<script>{}</script>", script);

    let mut document = if let Some(at) = markup.find(HEAD_CLOSE) {
        spliced(markup, at, &style_block)
    } else if let Some(at) = markup.find(HTML_OPEN) {
        spliced(
            markup,
            at + HTML_OPEN.len(),
            &format!("<head>{}</head>", style_block),
        )
    } else {
        format!(
            "<!DOCTYPE html><html><head>{}</head><body>{}</body></html>",
            style_block, markup
        )
    };

    match document.find(BODY_CLOSE) {
        Some(at) => document.insert_str(at, &script_block),
        None => document.push_str(&script_block),
    }
    document
}

/// [`compose`] over a bundle.
pub fn compose_bundle(bundle: &SourceBundle) -> String {
    compose(&bundle.markup, &bundle.style, &bundle.script)
}

/// Compose for the live preview frame: [`compose_bundle`] plus the
/// `ResizeObserver` guard ahead of the first `</head>`.
///
/// Exports use [`compose_bundle`] and never carry the guard.
pub fn compose_preview(bundle: &SourceBundle) -> String {
    let document = compose_bundle(bundle);
    match document.find(HEAD_CLOSE) {
        Some(at) => spliced(&document, at, PREVIEW_GUARD_SCRIPT),
        None => document,
    }
}

fn spliced(text: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..at]);
    out.push_str(insert);
    out.push_str(&text[at..]);
    out
}
