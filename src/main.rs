fn main() {
    requeues::app::startup::startup();
}
