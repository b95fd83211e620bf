mod gate_scenarios;
mod replay;
