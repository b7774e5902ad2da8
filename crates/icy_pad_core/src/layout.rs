/// Split `text` into display lines.
///
/// With `word_wrap` set, lines longer than `width` chars are broken after the
/// last space that still fits, or hard at `width` if there is none. Without
/// it every buffer line is one display line.
pub fn wrap_lines(text: &str, width: usize, word_wrap: bool) -> Vec<String> {
    let mut result = Vec::new();
    for line in text.split('\n') {
        if !word_wrap || width == 0 {
            result.push(line.to_string());
            continue;
        }
        wrap_line(line, width, &mut result);
    }
    result
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut rest: Vec<char> = line.chars().collect();
    while rest.len() > width {
        let break_at = rest[..=width].iter().rposition(|c| *c == ' ').filter(|&i| i > 0);
        match break_at {
            Some(i) => {
                out.push(rest[..i].iter().collect());
                rest.drain(..=i);
            }
            None => {
                out.push(rest[..width].iter().collect());
                rest.drain(..width);
            }
        }
    }
    out.push(rest.into_iter().collect());
}
