fn main() {
    // sqlx::migrate! はマイグレーションをコンパイル時に埋め込むため、変更時に再ビルドする
    println!("cargo:rerun-if-changed=migrations");
}
