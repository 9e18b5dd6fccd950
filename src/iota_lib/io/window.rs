//! A live counter display for long searches, drawn over the terminal with
//! cursor repositioning.

use std::fmt::Display;
use std::io::{stdout, Write};

use crossterm::{cursor, terminal, QueueableCommand};

pub struct SearchWindow {
    column: u16,
    bottom: u16,
}

#[derive(Debug, Clone, Copy)]
pub enum WindowItem {
    RulesApplied,
    ClosedBranches,
    OpenBranches,
    Time,
}

impl SearchWindow {
    pub fn new() -> Self {
        println!("c RULES APPLIED");
        println!("c CLOSED BRANCHES");
        println!("c OPEN BRANCHES");
        println!("c TIME");

        let location = cursor::position().expect("unable to display stats");

        SearchWindow {
            column: 18,
            bottom: location.1,
        }
    }

    fn offset(&self, item: WindowItem) -> (u16, u16) {
        let the_row = match item {
            WindowItem::RulesApplied => self.bottom - 4,
            WindowItem::ClosedBranches => self.bottom - 3,
            WindowItem::OpenBranches => self.bottom - 2,
            WindowItem::Time => self.bottom - 1,
        };
        (self.column, the_row)
    }

    pub fn update_item(&self, item: WindowItem, output: impl Display) {
        let mut stdout = stdout();
        let (x, y) = self.offset(item);

        stdout.queue(cursor::SavePosition).unwrap();
        stdout.queue(cursor::MoveTo(x, y)).unwrap();
        stdout
            .queue(terminal::Clear(terminal::ClearType::UntilNewLine))
            .unwrap();
        stdout.write_all(format!("{output}").as_bytes()).unwrap();
        stdout.queue(cursor::RestorePosition).unwrap();
    }

    pub fn flush(&self) {
        stdout().flush().unwrap();
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::new()
    }
}
