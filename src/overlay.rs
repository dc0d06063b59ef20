use crate::terminal::Terminal;
use crossterm::style::Color;

/// Draw a centred bordered box holding `lines`, over whatever is in the buffer.
pub fn render_box(term: &mut Terminal, lines: &[String], border_color: Color, text_color: Color) {
    if lines.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    // ┌─────┐
    term.set(start_x as i32, start_y as i32, '┌', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, start_y as i32, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, start_y as i32, '┐', Some(border_color), false);

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i;
        term.set(start_x as i32, y as i32, '│', Some(border_color), false);

        // Centre each line inside the box
        let free = max_width.saturating_sub(line.chars().count());
        let left = free / 2;
        let padded = format!(" {}{}{} ", " ".repeat(left), line, " ".repeat(free - left));
        for (j, ch) in padded.chars().enumerate() {
            term.set((start_x + 1 + j) as i32, y as i32, ch, Some(text_color), false);
        }

        term.set((start_x + box_width - 1) as i32, y as i32, '│', Some(border_color), false);
    }

    // └─────┘
    let bottom_y = start_y + box_height - 1;
    term.set(start_x as i32, bottom_y as i32, '└', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, bottom_y as i32, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, bottom_y as i32, '┘', Some(border_color), false);
}
