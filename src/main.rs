//! Command-line interface for wellbore engine

fn main() {
    println!("Wellbore Engine v0.1.0");
    println!();
    println!("Wellbore trajectory and torque-and-drag calculation engine.");
    println!("Use the `wellbore-cli` binary for trajectory, torque-drag and");
    println!("hookload calculations from the command line.");
    println!();
    println!("To use as a Rust library:");
    println!("  Add to Cargo.toml: wellbore-engine = \"0.1\"");
}
