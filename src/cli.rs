use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "face-report")]
#[command(about = "Upload a photo for facial analysis and print the scored report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を解析してレポートを表示
    Analyze {
        /// 画像ファイル (JPEG, PNG など、4MBまで)
        #[arg(required = true)]
        image: PathBuf,

        /// 解析サービスのベースURL
        #[arg(long)]
        base_url: Option<String>,

        /// 1リクエストあたりのタイムアウト（秒）
        #[arg(long)]
        timeout: Option<u64>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 既知の特徴と説明を一覧表示
    Features,

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// タイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
