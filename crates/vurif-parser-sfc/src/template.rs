use vurif_core::tags::is_void_tag;
use vurif_core::{Element, VurifError};

use crate::scanner::Scanner;

const V_IF: &str = "v-if";
const V_ELSE_IF: &str = "v-else-if";
const V_ELSE: &str = "v-else";

/// Compile template source into its top-level elements.
///
/// Elements carrying `v-else-if` / `v-else` are moved out of their parent's
/// children into the `if_branches` of the preceding `v-if` sibling. Text,
/// comments and interpolations are dropped.
pub fn compile_template(template: &str) -> Result<Vec<Element>, VurifError> {
    let mut s = Scanner::new(template);
    let mut roots: Vec<Element> = Vec::new();
    let mut stack: Vec<(Element, usize)> = Vec::new();

    while !s.eof() {
        if s.starts_with("<!--") {
            s.skip_comment()?;
        } else if s.starts_with("{{") {
            s.skip_interpolation();
        } else if s.at_close_tag() {
            let close_start = s.pos;
            let name = s.read_close_tag()?;
            if stack
                .last()
                .is_some_and(|(open, _)| open.tag.eq_ignore_ascii_case(name))
            {
                if let Some((element, _)) = stack.pop() {
                    attach(element, &mut stack, &mut roots);
                }
            } else if is_void_tag(name) {
                // `</input>` and friends carry no structure
            } else if let Some((open, open_start)) = stack.last()
                && stack.iter().any(|(e, _)| e.tag.eq_ignore_ascii_case(name))
            {
                return Err(s.error(
                    *open_start,
                    format!("element <{}> is missing end tag", open.tag),
                ));
            } else {
                return Err(s.error(close_start, format!("invalid end tag </{}>", name)));
            }
        } else if s.at_open_tag() {
            let open = s.read_open_tag()?;
            let mut element = Element::new(open.name);
            element.attrs = open.attrs;
            if open.self_closing || is_void_tag(&element.tag) {
                attach(element, &mut stack, &mut roots);
            } else if is_raw_text(&element.tag) {
                match s.find_close_tag(&element.tag) {
                    Some(close) => {
                        s.pos = close;
                        s.read_close_tag()?;
                        attach(element, &mut stack, &mut roots);
                    }
                    None => {
                        return Err(s.error(
                            open.start,
                            format!("element <{}> is missing end tag", element.tag),
                        ));
                    }
                }
            } else {
                stack.push((element, open.start));
            }
        } else {
            s.pos += 1;
        }
    }

    if let Some((open, start)) = stack.last() {
        return Err(s.error(*start, format!("element <{}> is missing end tag", open.tag)));
    }
    Ok(roots)
}

fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

fn attach(element: Element, stack: &mut [(Element, usize)], roots: &mut Vec<Element>) {
    let siblings = match stack.last_mut() {
        Some((parent, _)) => &mut parent.children,
        None => roots,
    };
    if (element.has_attr(V_ELSE_IF) || element.has_attr(V_ELSE))
        && let Some(head) = siblings.last_mut()
        && head.has_attr(V_IF)
        && !chain_closed(head)
    {
        head.if_branches.push(element);
        return;
    }
    siblings.push(element);
}

fn chain_closed(head: &Element) -> bool {
    head.if_branches
        .last()
        .is_some_and(|branch| branch.has_attr(V_ELSE))
}
