// src/ecs/component.rs

/// コンポーネントであることを示すマーカートレイトだよ。
///
/// `World` に入れられるのはこれを実装した型だけ。
/// `Debug` を要求してるのは、ログにそのまま出したいから！
pub trait Component: std::fmt::Debug + 'static {}
