fn main() {
    instanalytics_lib::run()
}
