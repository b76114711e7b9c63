fn main() {
    inventario_web::run_app();
}
