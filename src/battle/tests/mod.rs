#[cfg(test)]
mod common;



#[cfg(test)]
mod test_turn_flow;



#[cfg(test)]
mod test_observers;
