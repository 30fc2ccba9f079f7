mod scenario;
mod simulator;
