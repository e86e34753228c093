pub mod common;

mod test_automated_turn;
mod test_submit_move;
