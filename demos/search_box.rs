extern crate syosetu_metrics;

use syosetu_metrics::html::flatten_table_text;

const SEARCH_BOX: &str = r#"
<div class="searchkekka_box">
    <div class="novel_h"><a href="/n7855ck/">転生したら最強だった</a></div>
    <table>
        <tr>
            <td>ジャンル：ハイファンタジー〔ファンタジー〕</td>
            <td>キーワード：異世界転生 チート 成り上がり</td>
        </tr>
        <tr>
            <td>864,831文字 (全208部分)</td>
            <td>最終更新日：2021/05/03 12:30</td>
        </tr>
        <tr>
            <td>総合ポイント： 45,678pt</td>
            <td>ブックマーク： 12,345件</td>
            <td>日間pt： 12pt 週間pt： 345pt 月間pt： 6,789pt</td>
        </tr>
    </table>
</div>
"#;

fn main() {
    env_logger::init();

    let text = flatten_table_text(SEARCH_BOX).expect("flatten");
    let record = syosetu_metrics::extract(&text);

    let mut fields: Vec<_> = record.iter().collect();
    fields.sort_by_key(|(name, _)| *name);
    for (name, value) in fields {
        println!("{name}: {value:?}");
    }
}
