// Simulated real-time stream: tick logic, the timer-driven monitor, and
// the clock it reads.

pub mod clock;
pub mod monitor;
pub mod tick;
