pub(crate) mod array_helper;

use std::fmt;
use std::time::Instant;

/// Wall-clock timer, its `Display` prints the elapsed seconds right-aligned in the log width.
pub struct Timer {
    pub(crate) time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "total elapsed time:",
            self.time.elapsed().as_secs_f32()
        )
    }
}
