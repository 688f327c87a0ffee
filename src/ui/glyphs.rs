use crate::plot::DotCell;

#[derive(Clone, Copy, Debug)]
pub struct Glyphs {
    pub diagonal_match: &'static str,
    pub off_diagonal_match: &'static str,
    pub empty: &'static str,
    pub cursor: &'static str,
    pub h_separator: &'static str,
    pub v_separator: &'static str,
}

impl Glyphs {
    pub fn for_cell(&self, cell: DotCell) -> &'static str {
        match cell {
            DotCell::DiagonalMatch => self.diagonal_match,
            DotCell::Match => self.off_diagonal_match,
            DotCell::Empty => self.empty,
        }
    }
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        diagonal_match: "#",
        off_diagonal_match: "*",
        empty: ".",
        cursor: "@",
        h_separator: "-",
        v_separator: "|",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        diagonal_match: "█",
        off_diagonal_match: "•",
        empty: "·",
        cursor: "◆",
        h_separator: "─",
        v_separator: "│",
    }
}
