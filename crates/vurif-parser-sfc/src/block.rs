use vurif_core::VurifError;

use crate::scanner::Scanner;

const TAG_TEMPLATE: &str = "template";

/// Locate the top-level `<template>` block of a single-file component and
/// return its inner source. Nested `<template>` tags are depth-counted and
/// `<script>`, `<style>` and custom blocks are skipped whole.
pub fn extract_template(source: &str) -> Result<Option<&str>, VurifError> {
    let mut s = Scanner::new(source);
    while s.seek_lt() {
        if s.starts_with("<!--") {
            s.skip_comment()?;
        } else if s.at_close_tag() {
            s.read_close_tag()?;
        } else if s.at_open_tag() {
            let open = s.read_open_tag()?;
            if open.self_closing {
                if open.name.eq_ignore_ascii_case(TAG_TEMPLATE) {
                    return Ok(Some(""));
                }
                continue;
            }
            if open.name.eq_ignore_ascii_case(TAG_TEMPLATE) {
                return template_content(&mut s, open.start).map(Some);
            }
            match s.find_close_tag(open.name) {
                Some(close) => {
                    s.pos = close;
                    s.read_close_tag()?;
                }
                None => {
                    return Err(s.error(open.start, format!("unclosed <{}> block", open.name)));
                }
            }
        } else {
            s.pos += 1;
        }
    }
    Ok(None)
}

fn template_content<'a>(s: &mut Scanner<'a>, open_start: usize) -> Result<&'a str, VurifError> {
    let content_start = s.pos;
    let mut depth = 1usize;
    while s.seek_lt() {
        if s.starts_with("<!--") {
            s.skip_comment()?;
        } else if s.at_close_tag() {
            let close_start = s.pos;
            let name = s.read_close_tag()?;
            if name.eq_ignore_ascii_case(TAG_TEMPLATE) {
                depth -= 1;
                if depth == 0 {
                    return Ok(&s.src()[content_start..close_start]);
                }
            }
        } else if s.at_open_tag() {
            let open = s.read_open_tag()?;
            if open.name.eq_ignore_ascii_case(TAG_TEMPLATE) && !open.self_closing {
                depth += 1;
            }
        } else {
            s.pos += 1;
        }
    }
    Err(s.error(open_start, "unclosed <template> block"))
}
