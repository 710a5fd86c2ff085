pub mod common;





#[cfg(test)]
mod test_focus_energy;

#[cfg(test)]
mod test_burn_scenario;
