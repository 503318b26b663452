fn main() {
    beamview::cli::start_cli();
}
