mod removal_tests;

use std::cell::Cell;
use std::rc::Rc;

/// Counts live instances through a shared counter.
#[derive(Debug)]
pub(crate) struct Tracked {
    pub value: i32,
    live: Rc<Cell<isize>>,
}

impl Tracked {
    pub fn new(value: i32, live: &Rc<Cell<isize>>) -> Tracked {
        live.set(live.get() + 1);
        Tracked {
            value,
            live: live.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.value, &self.live)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
